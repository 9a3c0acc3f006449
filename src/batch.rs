use crate::codecs::ensure_available;
use crate::config::CompressionConfig;
use crate::constants::ORIGINALS_DIR_NAME;
use crate::error::{is_storage_exhausted, CompressionError, Result};
use crate::naming::FileNamer;
use crate::processing::transform;
use crate::progress::ProgressReporter;
use crate::report::{build_report, write_report};
use crate::results::{FileOutcome, FileResult, RunStatistics};
use crate::walk::{walk, ImageEntry};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Everything a caller needs after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub stats: RunStatistics,
    pub results: Vec<FileResult>,
    pub output_dir: PathBuf,
    /// `None` when nothing was processed or the report could not be written.
    pub report_path: Option<PathBuf>,
    /// Set when the run stopped before every file was tried.
    pub fatal: Option<CompressionError>,
}

impl RunSummary {
    fn empty(output_dir: PathBuf, fatal: Option<CompressionError>) -> Self {
        Self {
            stats: RunStatistics::default(),
            results: Vec::new(),
            output_dir,
            report_path: None,
            fatal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats.attempted == 0
    }
}

/// A per-file failure that also ends the run.
struct Aborted {
    result: FileResult,
    error: CompressionError,
}

/// Compresses every image under the configured directory into
/// `{source}/compress-{w}-{fmt}-{q}/`.
///
/// Per-file failures are recorded and the run moves on. Failing to create
/// output directories or running out of storage stops the run; files handled
/// up to that point are still counted and reported.
pub fn run(config: &CompressionConfig, progress: &dyn ProgressReporter) -> RunSummary {
    let output_dir = config.output_dir();

    if let Err(err) = ensure_available(config.format()) {
        error!("{}", err);
        return RunSummary::empty(output_dir, Some(err));
    }

    let start_time = Instant::now();
    let entries: Vec<Result<ImageEntry>> = walk(config.source_directory()).collect();

    if entries.is_empty() {
        warn!(
            "no image files found in {}",
            config.source_directory().display()
        );
        return RunSummary::empty(output_dir, None);
    }

    info!(
        "compressing {} files from {} into {}",
        entries.len(),
        config.source_directory().display(),
        output_dir.display()
    );

    if let Err(source) = fs::create_dir_all(&output_dir) {
        let err = CompressionError::DirectoryCreationFailed {
            path: output_dir.clone(),
            source,
        };
        error!("{}", err);
        return RunSummary::empty(output_dir, Some(err));
    }

    let mut namer = FileNamer::new(config.naming());
    let mut results = Vec::with_capacity(entries.len());
    let mut fatal = None;

    progress.begin(entries.len() as u64);
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = walk_error_path(&err, config.source_directory());
                warn!("skipping {}: {}", path.display(), err);
                results.push(FileResult::failed(&path, 0, &err));
                progress.advance(&path);
                continue;
            }
        };

        match process_entry(&entry, config, &mut namer, &output_dir) {
            Ok(result) => {
                log_result(&result);
                results.push(result);
                progress.advance(&entry.path);
            }
            Err(Aborted { result, error: err }) => {
                error!("stopping run at {}: {}", entry.path.display(), err);
                results.push(result);
                progress.advance(&entry.path);
                fatal = Some(err);
                break;
            }
        }
    }
    progress.finish(if fatal.is_some() { "aborted" } else { "done" });

    let stats = RunStatistics::from_results(&results, start_time.elapsed());
    info!(
        "finished: {} succeeded, {} failed, {:.1}% saved",
        stats.succeeded,
        stats.failed,
        stats.percent_saved()
    );

    let generated_at = Local::now();
    let text = build_report(config, &stats, &results, generated_at);
    let report_path = match write_report(&output_dir, &text, generated_at) {
        Ok(path) => Some(path),
        Err(err) => {
            warn!("could not write report: {}", err);
            None
        }
    };

    RunSummary {
        stats,
        results,
        output_dir,
        report_path,
        fatal,
    }
}

fn process_entry(
    entry: &ImageEntry,
    config: &CompressionConfig,
    namer: &mut FileNamer,
    output_dir: &Path,
) -> std::result::Result<FileResult, Aborted> {
    let bytes = match fs::read(&entry.path) {
        Ok(bytes) => bytes,
        Err(err) => return fail(entry, 0, CompressionError::Io(err)),
    };
    let original_size = bytes.len() as u64;

    let target = namer.assign(&entry.relative);
    let transformed = match transform(&bytes, config) {
        Ok(transformed) => transformed,
        Err(err) => return fail(entry, original_size, err),
    };

    let output_path = output_dir.join(target.with_extension(transformed.format.extension()));
    if let Err(err) = write_output(&output_path, &transformed.bytes) {
        return fail(entry, original_size, err);
    }

    if config.preserve_originals() {
        let original_copy = output_dir
            .join(ORIGINALS_DIR_NAME)
            .join(target.original_path());
        if let Err(err) = write_output(&original_copy, &bytes) {
            return fail(entry, original_size, err);
        }
    }

    let compressed_size = transformed.bytes.len() as u64;
    let resized = transformed.resized();
    let same_format = transformed.format.to_image_format() == transformed.source_format;
    let grew = compressed_size >= original_size && !resized && same_format;
    if grew {
        warn!(
            "{} did not shrink ({} -> {} bytes)",
            entry.path.display(),
            original_size,
            compressed_size
        );
    }

    Ok(FileResult {
        source_path: entry.path.clone(),
        original_size,
        outcome: FileOutcome::Compressed {
            output_path,
            compressed_size,
            format: transformed.format,
            resized,
            grew,
        },
    })
}

fn fail(
    entry: &ImageEntry,
    original_size: u64,
    err: CompressionError,
) -> std::result::Result<FileResult, Aborted> {
    let result = FileResult::failed(&entry.path, original_size, &err);
    if err.is_fatal() {
        Err(Aborted { result, error: err })
    } else {
        Ok(result)
    }
}

/// Writes `bytes`, creating parent directories first.
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CompressionError::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|err| {
        if is_storage_exhausted(&err) {
            CompressionError::OutputExhausted {
                path: path.to_path_buf(),
                source: err,
            }
        } else {
            CompressionError::Io(err)
        }
    })
}

fn walk_error_path(err: &CompressionError, root: &Path) -> PathBuf {
    match err {
        CompressionError::Walk(walk_err) => walk_err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf()),
        _ => root.to_path_buf(),
    }
}

fn log_result(result: &FileResult) {
    match &result.outcome {
        FileOutcome::Compressed {
            output_path,
            compressed_size,
            ..
        } => debug!(
            "{} -> {} ({} -> {} bytes)",
            result.source_path.display(),
            output_path.display(),
            result.original_size,
            compressed_size
        ),
        FileOutcome::Failed { kind, message } => warn!(
            "{} failed ({}): {}",
            result.source_path.display(),
            kind,
            message
        ),
    }
}
