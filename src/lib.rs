pub mod batch;
pub mod cli;
pub mod codecs;
pub mod config;
pub mod constants;
pub mod error;
pub mod formats;
pub mod logger;
pub mod naming;
pub mod processing;
pub mod progress;
pub mod prompt;
pub mod report;
pub mod results;
pub mod samples;
pub mod ui;
pub mod utils;
pub mod walk;

pub use batch::{run, RunSummary};
pub use codecs::{codec_support, ensure_available, CodecSupport};
pub use config::CompressionConfig;
pub use error::{CompressionError, FailureKind, Result};
pub use formats::{FormatChoice, OutputFormat};
pub use naming::{transliterate_stem, FileNamer, NamingStrategy, SanitizedPath};
pub use processing::{resize_image, target_dimensions, transform, Transformed};
pub use progress::{BarProgress, NoProgress, ProgressReporter};
pub use report::{build_report, report_file_name, write_report};
pub use results::{FileOutcome, FileResult, RunStatistics};
pub use samples::{create_sample_set, render_sample};
pub use walk::{walk, ImageEntry};
