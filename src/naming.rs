//! Output file naming.
//!
//! Two strategies turn a source file name into something safe to write on
//! any filesystem:
//!
//! - [`NamingStrategy::Random`] throws the stem away and uses a numeric token
//!   that is unique within the run: `48213-compress.jpg`.
//! - [`NamingStrategy::Transliterate`] keeps the stem, mapping non-ASCII
//!   characters to their closest ASCII spelling and everything unmappable
//!   to `_`: `Café Crème.JPG` becomes `cafe-creme.jpg`.
//!
//! Both keep the source extension, lowercased.

use crate::constants::{
    NAME_PLACEHOLDER, ORIGINALS_DIR_NAME, RANDOM_NAME_SUFFIX, RANDOM_TOKEN_MAX, RANDOM_TOKEN_MIN,
    RANDOM_TOKEN_RETRIES,
};
use clap::ValueEnum;
use deunicode::deunicode_with_tofu;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NamingStrategy {
    /// `{token}-compress.{ext}`, unique within the run
    #[default]
    Random,
    /// ASCII transliteration of the original stem
    Transliterate,
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingStrategy::Random => write!(f, "random"),
            NamingStrategy::Transliterate => write!(f, "transliterate"),
        }
    }
}

/// Splits a file name into its stem and lowercased extension.
///
/// A leading dot is part of the stem, so `.jpg` has no extension.
pub fn split_name(name: &str) -> (&str, String) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            let ext: String = ext
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            (stem, ext)
        }
        _ => (name, String::new()),
    }
}

/// Deterministic ASCII rendering of a file stem.
///
/// The result only contains `[a-z0-9_-]` and is never empty.
pub fn transliterate_stem(stem: &str) -> String {
    let ascii = deunicode_with_tofu(stem, NAME_PLACEHOLDER);
    let mut out = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_whitespace() {
            pending_dash = !out.is_empty();
            continue;
        }
        if pending_dash {
            out.push('-');
            pending_dash = false;
        }
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }

    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

fn join_name(stem: &str, ext: &str) -> String {
    if ext.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, ext)
    }
}

/// Preserved copies live under `originals/` at the top of the output
/// directory, so a source directory that sanitizes to the same name moves
/// aside.
fn reserve_top_level(depth: usize, name: String) -> String {
    if depth == 0 && name == ORIGINALS_DIR_NAME {
        format!("{}-2", name)
    } else {
        name
    }
}

/// Where one source file lands inside the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedPath {
    /// Sanitized parent directories, relative to the output directory.
    pub dir: PathBuf,
    pub stem: String,
    /// Lowercased extension of the source file.
    pub source_extension: String,
}

impl SanitizedPath {
    pub fn with_extension(&self, ext: &str) -> PathBuf {
        self.dir.join(join_name(&self.stem, ext))
    }

    /// Relative path for a byte-identical copy of the source.
    pub fn original_path(&self) -> PathBuf {
        self.with_extension(&self.source_extension)
    }
}

/// Hands out output names for one run.
#[derive(Debug)]
pub struct FileNamer {
    strategy: NamingStrategy,
    rng: StdRng,
    used_tokens: HashSet<u32>,
    taken: HashSet<(PathBuf, String)>,
    assigned: HashMap<PathBuf, SanitizedPath>,
}

impl FileNamer {
    pub fn new(strategy: NamingStrategy) -> Self {
        Self::with_rng(strategy, StdRng::from_os_rng())
    }

    /// Reproducible token sequence, for tests.
    pub fn with_seed(strategy: NamingStrategy, seed: u64) -> Self {
        Self::with_rng(strategy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(strategy: NamingStrategy, rng: StdRng) -> Self {
        Self {
            strategy,
            rng,
            used_tokens: HashSet::new(),
            taken: HashSet::new(),
            assigned: HashMap::new(),
        }
    }

    /// Maps a bare file name to a safe one, keeping the lowercased extension.
    pub fn sanitize(&mut self, original_name: &str) -> String {
        let (stem, ext) = split_name(original_name);
        let stem = self.stem_for(stem);
        join_name(&stem, &ext)
    }

    /// Output location for a source file given relative to the source root.
    ///
    /// The same source path always gets the same answer. Two different
    /// sources never share a stem inside one output directory, so converting
    /// `a.jpg` and `a.png` to one format cannot collide.
    pub fn assign(&mut self, relative: &Path) -> SanitizedPath {
        if let Some(existing) = self.assigned.get(relative) {
            return existing.clone();
        }

        let dir: PathBuf = relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|component| match component {
                        Component::Normal(name) => {
                            Some(transliterate_stem(&name.to_string_lossy()))
                        }
                        _ => None,
                    })
                    .enumerate()
                    .map(|(depth, name)| reserve_top_level(depth, name))
                    .collect()
            })
            .unwrap_or_default();

        let file_name = relative
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (stem, source_extension) = split_name(&file_name);

        let base = self.stem_for(stem);
        let mut candidate = base.clone();
        let mut counter = 2;
        while self.taken.contains(&(dir.clone(), candidate.clone())) {
            candidate = format!("{}-{}", base, counter);
            counter += 1;
        }
        self.taken.insert((dir.clone(), candidate.clone()));

        let sanitized = SanitizedPath {
            dir,
            stem: candidate,
            source_extension,
        };
        self.assigned.insert(relative.to_path_buf(), sanitized.clone());
        sanitized
    }

    fn stem_for(&mut self, stem: &str) -> String {
        match self.strategy {
            NamingStrategy::Random => {
                format!("{}{}", self.next_token(), RANDOM_NAME_SUFFIX)
            }
            NamingStrategy::Transliterate => transliterate_stem(stem),
        }
    }

    fn next_token(&mut self) -> u32 {
        for _ in 0..RANDOM_TOKEN_RETRIES {
            let token = self.rng.random_range(RANDOM_TOKEN_MIN..=RANDOM_TOKEN_MAX);
            if self.used_tokens.insert(token) {
                return token;
            }
        }
        // The five-digit space is crowded; widen it.
        loop {
            let token = self.rng.random_range(RANDOM_TOKEN_MAX + 1..=u32::MAX);
            if self.used_tokens.insert(token) {
                return token;
            }
        }
    }
}
