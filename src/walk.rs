use crate::constants::{OUTPUT_DIR_PREFIX, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::{CompressionError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// An image found under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    /// Path relative to the walked root.
    pub relative: PathBuf,
}

/// Lazily enumerates images under `root`, depth first, sorted by file name
/// within each directory.
///
/// The tool's own `compress-*` output directories are pruned; hidden
/// entries are walked like any other. Every call starts a fresh traversal. Errors from the filesystem
/// are yielded rather than skipped.
pub fn walk(root: &Path) -> impl Iterator<Item = Result<ImageEntry>> {
    let root = root.to_path_buf();
    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    walker
        .filter_entry(|entry| entry.depth() == 0 || !should_prune(entry))
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() || !is_image_file(entry.path()) {
                    return None;
                }
                let relative = entry
                    .path()
                    .strip_prefix(&root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
                Some(Ok(ImageEntry {
                    path: entry.into_path(),
                    relative,
                }))
            }
            Err(err) => Some(Err(CompressionError::Walk(err))),
        })
}

fn should_prune(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let prune = is_output_dir_name(&name);
    if prune {
        debug!("skipping earlier output {}", entry.path().display());
    }
    prune
}

/// Matches directories written by earlier runs.
pub fn is_output_dir_name(name: &str) -> bool {
    name.starts_with(OUTPUT_DIR_PREFIX)
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}
