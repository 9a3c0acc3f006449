use anyhow::{bail, Context};
use clap::Parser;
use console::Term;
use dir_squeeze::cli::{Args, Commands, CompressArgs};
use dir_squeeze::constants::{FOLDER_PREFIX, RATIO_PREFIX, SIZE_PREFIX};
use dir_squeeze::logger::{self, Verbosity};
use dir_squeeze::prompt::prompt_config;
use dir_squeeze::ui::Printer;
use dir_squeeze::utils::format_file_size;
use dir_squeeze::{codec_support, create_sample_set, progress, run, CompressionConfig, RunSummary};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if args.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    logger::init(verbosity);
    let printer = Printer::new(!args.no_color, verbosity.is_quiet());

    match args.command {
        Commands::Compress(compress) => compress_directory(&compress, &printer),
        Commands::Check => {
            show_codecs(&printer);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Samples { directory } => {
            let created = create_sample_set(&directory)
                .with_context(|| format!("failed to create samples in {}", directory.display()))?;
            for path in &created {
                printer.line(format!("Created {}", path.display()));
            }
            printer.success(format!("{} test images written", created.len()));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn compress_directory(args: &CompressArgs, printer: &Printer) -> anyhow::Result<ExitCode> {
    let config = if args.wants_prompt() {
        printer.header("Image Compression Tool");
        let term = Term::stdout();
        match prompt_config(&term, args.directory.as_deref())? {
            Some(config) => config,
            None => {
                printer.info("Operation cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
        }
    } else {
        let Some(directory) = args.directory.clone() else {
            bail!("no directory given");
        };
        CompressionConfig::new(
            directory,
            args.width_limit(),
            args.format,
            args.quality,
            args.preserve_originals,
            args.naming,
        )
        .context("invalid settings")?
    };

    printer.info(format!("{} Compressing {}", FOLDER_PREFIX, config.source_directory().display()));

    let reporter = progress::detect(!args.no_progress);
    let summary = run(&config, reporter.as_ref());
    print_summary(&summary, printer);

    match summary.fatal {
        Some(err) => {
            printer.error(format!("Run aborted: {}", err));
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

fn print_summary(summary: &RunSummary, printer: &Printer) {
    if summary.is_empty() {
        if summary.fatal.is_none() {
            printer.warning("No image files found");
        }
        return;
    }

    let stats = &summary.stats;
    printer.header("Compression complete");
    printer.line(format!(
        "{} of {} images processed successfully",
        stats.succeeded, stats.attempted
    ));
    printer.line(format!(
        "{} {} -> {}",
        SIZE_PREFIX,
        format_file_size(stats.bytes_before),
        format_file_size(stats.bytes_after)
    ));
    printer.line(format!("{} Saved {:.1}%", RATIO_PREFIX, stats.percent_saved()));
    if stats.resized > 0 {
        printer.line(format!("Resized: {}", stats.resized));
    }
    if stats.grew > 0 {
        printer.warning(format!("{} files did not get smaller", stats.grew));
    }
    for (kind, count) in &stats.failures_by_kind {
        printer.warning(format!("{}: {}", kind, count));
    }
    for result in summary.results.iter().filter(|r| !r.is_success()) {
        if let Some(message) = result.error_message() {
            printer.warning(format!("{}: {}", result.source_path.display(), message));
        }
    }
    printer.line(format!("{} Output: {}", FOLDER_PREFIX, summary.output_dir.display()));
    if let Some(report) = &summary.report_path {
        printer.success(format!("Report: {}", report.display()));
    }
}

fn show_codecs(printer: &Printer) {
    printer.header("Codec support");
    printer.line(format!("{:<8} {:<8} {:<8}", "FORMAT", "DECODE", "ENCODE"));
    for support in codec_support() {
        let mark = |ok: bool| if ok { "yes" } else { "missing" };
        printer.line(format!(
            "{:<8} {:<8} {:<8}",
            support.format.to_string(),
            mark(support.decode),
            mark(support.encode)
        ));
    }
}
