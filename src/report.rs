//! Plain-text run report.
//!
//! The report is built as a string first so it can be inspected in tests
//! without touching the filesystem; only [`write_report`] does I/O.

use crate::config::CompressionConfig;
use crate::constants::{
    REPORT_FILE_PREFIX, REPORT_FILE_TIMESTAMP_FORMAT, REPORT_HEADER_TIMESTAMP_FORMAT,
    REPORT_RULE_WIDTH,
};
use crate::error::Result;
use crate::results::{FileOutcome, FileResult, RunStatistics};
use crate::utils::format_file_size;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders the report. Identical inputs give identical text apart from
/// `generated_at`.
pub fn build_report(
    config: &CompressionConfig,
    stats: &RunStatistics,
    results: &[FileResult],
    generated_at: DateTime<Local>,
) -> String {
    let rule = "=".repeat(REPORT_RULE_WIDTH);
    let thin_rule = "-".repeat(REPORT_RULE_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Image Compression Report");
    let _ = writeln!(
        out,
        "Generated: {}",
        generated_at.format(REPORT_HEADER_TIMESTAMP_FORMAT)
    );
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out);

    let _ = writeln!(out, "Configuration");
    let _ = writeln!(out, "{}", thin_rule);
    let _ = writeln!(out, "{}", config);
    let _ = writeln!(out);

    let _ = writeln!(out, "Totals");
    let _ = writeln!(out, "{}", thin_rule);
    let _ = writeln!(out, "Files attempted: {}", stats.attempted);
    let _ = writeln!(out, "Files succeeded: {}", stats.succeeded);
    let _ = writeln!(out, "Files failed: {}", stats.failed);
    let _ = writeln!(out, "Files resized: {}", stats.resized);
    let _ = writeln!(out, "Files not smaller than source: {}", stats.grew);
    let _ = writeln!(out);

    let _ = writeln!(out, "Sizes");
    let _ = writeln!(out, "{}", thin_rule);
    let _ = writeln!(
        out,
        "Original size: {} bytes ({})",
        stats.bytes_before,
        format_file_size(stats.bytes_before)
    );
    let _ = writeln!(
        out,
        "Compressed size: {} bytes ({})",
        stats.bytes_after,
        format_file_size(stats.bytes_after)
    );
    let saved = stats.bytes_saved();
    let saved_human = if saved < 0 {
        format!("-{}", format_file_size(saved.unsigned_abs()))
    } else {
        format_file_size(saved.unsigned_abs())
    };
    let _ = writeln!(out, "Space saved: {} bytes ({})", saved, saved_human);
    let _ = writeln!(out, "Percent saved: {:.1}%", stats.percent_saved());
    let _ = writeln!(
        out,
        "Elapsed: {:.2}s ({:.1} files/s)",
        stats.elapsed.as_secs_f64(),
        stats.files_per_second()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Failures");
    let _ = writeln!(out, "{}", thin_rule);
    if stats.failed == 0 {
        let _ = writeln!(out, "None");
    } else {
        for (kind, count) in &stats.failures_by_kind {
            let _ = writeln!(out, "{}: {}", kind, count);
        }
        let _ = writeln!(out);
        for result in results {
            if let FileOutcome::Failed { kind, message } = &result.outcome {
                let _ = writeln!(
                    out,
                    "- {} [{}]: {}",
                    result.source_path.display(),
                    kind,
                    message
                );
            }
        }
    }
    let _ = writeln!(out, "{}", rule);

    out
}

/// `compression_report_YYYYMMDD_HHMMSS_mmm.txt`
pub fn report_file_name(generated_at: DateTime<Local>) -> String {
    format!(
        "{}{}.txt",
        REPORT_FILE_PREFIX,
        generated_at.format(REPORT_FILE_TIMESTAMP_FORMAT)
    )
}

pub fn write_report(
    output_dir: &Path,
    text: &str,
    generated_at: DateTime<Local>,
) -> Result<PathBuf> {
    let path = output_dir.join(report_file_name(generated_at));
    fs::write(&path, text)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CompressionError, FailureKind};
    use crate::formats::{FormatChoice, OutputFormat};
    use crate::naming::NamingStrategy;
    use chrono::TimeZone;
    use std::time::Duration;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn sample_results() -> Vec<FileResult> {
        let decode = CompressionError::Decode(image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "truncated",
        )));
        vec![
            FileResult {
                source_path: PathBuf::from("holiday/beach.jpg"),
                original_size: 2000,
                outcome: FileOutcome::Compressed {
                    output_path: PathBuf::from("holiday/11111-compress.webp"),
                    compressed_size: 500,
                    format: OutputFormat::WebP,
                    resized: true,
                    grew: false,
                },
            },
            FileResult::failed("broken.jpg", 32, &decode),
        ]
    }

    #[test]
    fn test_report_file_name_is_filesystem_safe() {
        let name = report_file_name(fixed_time());
        assert_eq!(name, "compression_report_20240309_140507_000.txt");
        assert!(!name.contains(':'));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_report_file_name_separates_runs_within_a_second() {
        let first = report_file_name(fixed_time());
        let second = report_file_name(fixed_time() + chrono::TimeDelta::milliseconds(42));
        assert_ne!(first, second);
        assert_eq!(second, "compression_report_20240309_140507_042.txt");
    }

    #[test]
    fn test_build_report_contents() {
        let temp_dir = TempDir::new().unwrap();
        let config = CompressionConfig::new(
            temp_dir.path(),
            Some(1920),
            FormatChoice::Convert(OutputFormat::WebP),
            Some(85),
            false,
            NamingStrategy::Random,
        )
        .unwrap();
        let results = sample_results();
        let stats = RunStatistics::from_results(&results, Duration::from_secs(2));

        let text = build_report(&config, &stats, &results, fixed_time());

        assert!(text.contains("Generated: 2024-03-09 14:05:07"));
        assert!(text.contains("Quality: 85"));
        assert!(text.contains("Maximum width: 1920px"));
        assert!(text.contains("Output directory: compress-1920-webp-85/"));
        assert!(text.contains("Files attempted: 2"));
        assert!(text.contains("Files succeeded: 1"));
        assert!(text.contains("Files failed: 1"));
        assert!(text.contains("Original size: 2000 bytes"));
        assert!(text.contains("Compressed size: 500 bytes"));
        assert!(text.contains("Percent saved: 75.0%"));
        assert!(text.contains(&format!("{}: 1", FailureKind::Decode)));
        assert!(text.contains("- broken.jpg [decode error]: Failed to decode image"));

        let again = build_report(&config, &stats, &results, fixed_time());
        assert_eq!(text, again);
    }

    #[test]
    fn test_build_report_zero_before() {
        let temp_dir = TempDir::new().unwrap();
        let config = CompressionConfig::new(
            temp_dir.path(),
            None,
            FormatChoice::Keep,
            None,
            false,
            NamingStrategy::Transliterate,
        )
        .unwrap();
        let stats = RunStatistics::from_results(&[], Duration::ZERO);
        let text = build_report(&config, &stats, &[], fixed_time());
        assert!(text.contains("Percent saved: 0.0%"));
        assert!(text.contains("Maximum width: no limit"));
        assert!(text.contains("None"));
    }

    #[test]
    fn test_write_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_report(temp_dir.path(), "hello", fixed_time()).unwrap();
        assert_eq!(
            path,
            temp_dir.path().join("compression_report_20240309_140507_000.txt")
        );
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }
}
