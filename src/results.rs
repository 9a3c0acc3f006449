use crate::error::{CompressionError, FailureKind};
use crate::formats::OutputFormat;
use crate::utils::calculate_compression_ratio;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileResult {
    pub source_path: PathBuf,
    pub original_size: u64,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Compressed {
        output_path: PathBuf,
        compressed_size: u64,
        format: OutputFormat,
        resized: bool,
        /// Output not smaller than the source although nothing forced it.
        grew: bool,
    },
    Failed {
        kind: FailureKind,
        message: String,
    },
}

impl FileResult {
    pub fn failed(source_path: impl Into<PathBuf>, original_size: u64, err: &CompressionError) -> Self {
        Self {
            source_path: source_path.into(),
            original_size,
            outcome: FileOutcome::Failed {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, FileOutcome::Compressed { .. })
    }

    pub fn output_path(&self) -> Option<&Path> {
        match &self.outcome {
            FileOutcome::Compressed { output_path, .. } => Some(output_path),
            FileOutcome::Failed { .. } => None,
        }
    }

    pub fn compressed_size(&self) -> Option<u64> {
        match self.outcome {
            FileOutcome::Compressed { compressed_size, .. } => Some(compressed_size),
            FileOutcome::Failed { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            FileOutcome::Compressed { .. } => None,
            FileOutcome::Failed { message, .. } => Some(message),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.outcome {
            FileOutcome::Compressed { .. } => None,
            FileOutcome::Failed { kind, .. } => Some(kind),
        }
    }
}

/// Totals for one run, computed once from its file results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStatistics {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Source bytes of successfully compressed files.
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub resized: usize,
    pub grew: usize,
    pub failures_by_kind: BTreeMap<FailureKind, usize>,
    pub elapsed: Duration,
}

impl RunStatistics {
    pub fn from_results(results: &[FileResult], elapsed: Duration) -> Self {
        let mut stats = RunStatistics {
            attempted: results.len(),
            elapsed,
            ..Default::default()
        };

        for result in results {
            match &result.outcome {
                FileOutcome::Compressed {
                    compressed_size,
                    resized,
                    grew,
                    ..
                } => {
                    stats.succeeded += 1;
                    stats.bytes_before += result.original_size;
                    stats.bytes_after += compressed_size;
                    if *resized {
                        stats.resized += 1;
                    }
                    if *grew {
                        stats.grew += 1;
                    }
                }
                FileOutcome::Failed { kind, .. } => {
                    stats.failed += 1;
                    *stats.failures_by_kind.entry(*kind).or_insert(0) += 1;
                }
            }
        }

        stats
    }

    /// `(1 - after / before) * 100`, or 0 when nothing was compressed.
    pub fn percent_saved(&self) -> f64 {
        calculate_compression_ratio(self.bytes_before, self.bytes_after)
    }

    pub fn bytes_saved(&self) -> i64 {
        self.bytes_before as i64 - self.bytes_after as i64
    }

    pub fn files_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempted as f64 / secs
        } else {
            0.0
        }
    }
}
