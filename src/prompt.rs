//! Interactive configuration on the terminal.
//!
//! Each answer goes through a pure `parse_*` function so the rules can be
//! tested without a terminal; [`prompt_config`] only loops until an answer
//! parses.

use crate::config::CompressionConfig;
use crate::constants::{DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY};
use crate::error::{CompressionError, Result};
use crate::formats::{FormatChoice, OutputFormat};
use crate::naming::NamingStrategy;
use console::{style, Term};
use std::path::{Path, PathBuf};

const FORMAT_MENU: &[(&str, FormatChoice)] = &[
    (
        "WebP (default, recommended for best compression)",
        FormatChoice::Convert(OutputFormat::WebP),
    ),
    ("JPEG", FormatChoice::Convert(OutputFormat::Jpeg)),
    ("PNG", FormatChoice::Convert(OutputFormat::Png)),
    ("BMP", FormatChoice::Convert(OutputFormat::Bmp)),
    ("TIFF", FormatChoice::Convert(OutputFormat::Tiff)),
    ("Original format (keep each image's format)", FormatChoice::Keep),
];

const NAMING_MENU: &[(&str, NamingStrategy)] = &[
    (
        "Random numeric names (default)",
        NamingStrategy::Random,
    ),
    (
        "Transliterated original names",
        NamingStrategy::Transliterate,
    ),
];

fn invalid(message: impl Into<String>) -> CompressionError {
    CompressionError::Prompt(message.into())
}

pub fn parse_directory(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("Please enter a directory path."));
    }
    let path = PathBuf::from(trimmed);
    if !path.exists() {
        return Err(CompressionError::SourceNotFound(path));
    }
    if !path.is_dir() {
        return Err(CompressionError::NotADirectory(path));
    }
    Ok(path)
}

/// Empty input means the default quality.
pub fn parse_quality(input: &str) -> Result<u8> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_QUALITY);
    }
    let value: u32 = trimmed
        .parse()
        .map_err(|_| invalid("Please enter a valid number."))?;
    match u8::try_from(value) {
        Ok(q) if (MIN_QUALITY..=MAX_QUALITY).contains(&q) => Ok(q),
        _ => Err(invalid(format!(
            "Quality must be between {} and {}.",
            MIN_QUALITY, MAX_QUALITY
        ))),
    }
}

/// Empty input means the default width; `none` or `0` disables resizing.
pub fn parse_max_width(input: &str) -> Result<Option<u32>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Some(DEFAULT_MAX_WIDTH));
    }
    if trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| invalid("Please enter a valid number."))?;
    match value {
        0 => Ok(None),
        v if v > 0 && v <= u32::MAX as i64 => Ok(Some(v as u32)),
        _ => Err(invalid("Width must be a positive number.")),
    }
}

/// Accepts a menu number or a format name.
pub fn parse_format_choice(input: &str) -> Result<FormatChoice> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(FormatChoice::default());
    }
    if let Ok(index) = trimmed.parse::<usize>() {
        return FORMAT_MENU
            .get(index.wrapping_sub(1))
            .map(|(_, choice)| *choice)
            .ok_or_else(|| invalid(format!("Please enter a valid option (1-{}).", FORMAT_MENU.len())));
    }
    trimmed.parse::<FormatChoice>()
}

pub fn parse_yes_no(input: &str, default: bool) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(invalid("Please answer y or n.")),
    }
}

pub fn parse_naming(input: &str) -> Result<NamingStrategy> {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "" | "1" | "random" => Ok(NamingStrategy::Random),
        "2" | "transliterate" => Ok(NamingStrategy::Transliterate),
        _ => Err(invalid(format!(
            "Please enter a valid option (1-{}).",
            NAMING_MENU.len()
        ))),
    }
}

fn ask<T>(term: &Term, question: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
    loop {
        term.write_str(&format!("{} ", question))
            .map_err(|e| invalid(e.to_string()))?;
        let answer = term.read_line().map_err(|e| invalid(e.to_string()))?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(err) => {
                term.write_line(&style(err.to_string()).yellow().to_string())
                    .map_err(|e| invalid(e.to_string()))?;
            }
        }
    }
}

fn print_menu<T>(term: &Term, title: &str, menu: &[(&str, T)]) -> Result<()> {
    term.write_line("").map_err(|e| invalid(e.to_string()))?;
    term.write_line(title).map_err(|e| invalid(e.to_string()))?;
    for (index, (label, _)) in menu.iter().enumerate() {
        term.write_line(&format!("{}. {}", index + 1, label))
            .map_err(|e| invalid(e.to_string()))?;
    }
    Ok(())
}

/// Walks the user through every setting.
///
/// # Returns
/// * `Ok(Some(config))` - Confirmed settings
/// * `Ok(None)` - The user declined at the confirmation step
pub fn prompt_config(term: &Term, directory: Option<&Path>) -> Result<Option<CompressionConfig>> {
    if !term.is_term() {
        return Err(invalid(
            "interactive mode needs a terminal; pass a directory instead",
        ));
    }

    let directory = match directory {
        Some(dir) => dir.to_path_buf(),
        None => ask(
            term,
            "Enter the directory path containing images to compress:",
            parse_directory,
        )?,
    };

    let quality = ask(
        term,
        &format!("Enter compression quality (1-100, default {}):", DEFAULT_QUALITY),
        parse_quality,
    )?;
    let max_width = ask(
        term,
        &format!(
            "Enter maximum width in pixels (default {}, 'none' for no limit):",
            DEFAULT_MAX_WIDTH
        ),
        parse_max_width,
    )?;

    print_menu(term, "Output format options:", FORMAT_MENU)?;
    let format = ask(
        term,
        &format!("Choose output format (1-{}):", FORMAT_MENU.len()),
        parse_format_choice,
    )?;

    let preserve = ask(term, "Keep a copy of the originals? (y/N):", |input| {
        parse_yes_no(input, false)
    })?;

    print_menu(term, "File naming options:", NAMING_MENU)?;
    let naming = ask(
        term,
        &format!("Choose file naming (1-{}):", NAMING_MENU.len()),
        parse_naming,
    )?;

    let config = CompressionConfig::new(
        directory,
        max_width,
        format,
        Some(quality),
        preserve,
        naming,
    )?;

    term.write_line("").map_err(|e| invalid(e.to_string()))?;
    term.write_line(&style("Compression Settings:").bold().to_string())
        .map_err(|e| invalid(e.to_string()))?;
    term.write_line(&config.to_string())
        .map_err(|e| invalid(e.to_string()))?;

    let proceed = ask(term, "\nProceed with these settings? (y/n):", |input| {
        parse_yes_no(input, false)
    })?;

    Ok(proceed.then_some(config))
}
