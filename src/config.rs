use crate::constants::{
    DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY, NO_LIMIT_LABEL, OUTPUT_DIR_PREFIX,
};
use crate::error::{CompressionError, Result};
use crate::formats::FormatChoice;
use crate::naming::NamingStrategy;
use std::fmt;
use std::path::{Path, PathBuf};

/// Settings for one run. Validated on construction and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionConfig {
    source_directory: PathBuf,
    max_width: Option<u32>,
    format: FormatChoice,
    quality: u8,
    preserve_originals: bool,
    naming: NamingStrategy,
}

impl CompressionConfig {
    pub fn new(
        source_directory: impl Into<PathBuf>,
        max_width: Option<u32>,
        format: FormatChoice,
        quality: Option<u8>,
        preserve_originals: bool,
        naming: NamingStrategy,
    ) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressionError::InvalidQuality(quality));
        }

        if let Some(width) = max_width {
            if width == 0 {
                return Err(CompressionError::InvalidWidth(width));
            }
        }

        let source_directory = source_directory.into();
        if !source_directory.exists() {
            return Err(CompressionError::SourceNotFound(source_directory));
        }
        if !source_directory.is_dir() {
            return Err(CompressionError::NotADirectory(source_directory));
        }

        Ok(Self {
            source_directory,
            max_width,
            format,
            quality,
            preserve_originals,
            naming,
        })
    }

    pub fn source_directory(&self) -> &Path {
        &self.source_directory
    }

    pub fn max_width(&self) -> Option<u32> {
        self.max_width
    }

    pub fn format(&self) -> FormatChoice {
        self.format
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn preserve_originals(&self) -> bool {
        self.preserve_originals
    }

    pub fn naming(&self) -> NamingStrategy {
        self.naming
    }

    /// `compress-{width|orig}-{format}-{quality}`
    pub fn output_dir_name(&self) -> String {
        let width = self
            .max_width
            .map(|w| w.to_string())
            .unwrap_or_else(|| NO_LIMIT_LABEL.to_string());
        format!(
            "{}{}-{}-{}",
            OUTPUT_DIR_PREFIX,
            width,
            self.format.label(),
            self.quality
        )
    }

    pub fn output_dir(&self) -> PathBuf {
        self.source_directory.join(self.output_dir_name())
    }
}

impl fmt::Display for CompressionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Directory: {}", self.source_directory.display())?;
        writeln!(f, "Quality: {}", self.quality)?;
        match self.max_width {
            Some(width) => writeln!(f, "Maximum width: {}px", width)?,
            None => writeln!(f, "Maximum width: no limit")?,
        }
        writeln!(f, "Output format: {}", self.format)?;
        writeln!(
            f,
            "Preserve originals: {}",
            if self.preserve_originals { "yes" } else { "no" }
        )?;
        writeln!(f, "File naming: {}", self.naming)?;
        write!(f, "Output directory: {}/", self.output_dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::OutputFormat;
    use tempfile::TempDir;

    fn config_in(dir: &Path, max_width: Option<u32>, format: FormatChoice) -> CompressionConfig {
        CompressionConfig::new(dir, max_width, format, Some(85), false, NamingStrategy::Random)
            .unwrap()
    }

    #[test]
    fn test_output_dir_name() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(
            temp_dir.path(),
            Some(1920),
            FormatChoice::Convert(OutputFormat::WebP),
        );
        assert_eq!(config.output_dir_name(), "compress-1920-webp-85");
        assert_eq!(config.output_dir(), temp_dir.path().join("compress-1920-webp-85"));
    }

    #[test]
    fn test_output_dir_name_no_limit_keep() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path(), None, FormatChoice::Keep);
        assert_eq!(config.output_dir_name(), "compress-orig-keep-85");
    }

    #[test]
    fn test_default_quality() {
        let temp_dir = TempDir::new().unwrap();
        let config = CompressionConfig::new(
            temp_dir.path(),
            None,
            FormatChoice::default(),
            None,
            false,
            NamingStrategy::default(),
        )
        .unwrap();
        assert_eq!(config.quality(), DEFAULT_QUALITY);
    }

    #[test]
    fn test_invalid_quality() {
        let temp_dir = TempDir::new().unwrap();
        for quality in [0u8, 101, 255] {
            let result = CompressionConfig::new(
                temp_dir.path(),
                None,
                FormatChoice::Keep,
                Some(quality),
                false,
                NamingStrategy::Random,
            );
            assert!(matches!(result, Err(CompressionError::InvalidQuality(q)) if q == quality));
        }
    }

    #[test]
    fn test_invalid_width() {
        let temp_dir = TempDir::new().unwrap();
        let result = CompressionConfig::new(
            temp_dir.path(),
            Some(0),
            FormatChoice::Keep,
            None,
            false,
            NamingStrategy::Random,
        );
        assert!(matches!(result, Err(CompressionError::InvalidWidth(0))));
    }

    #[test]
    fn test_missing_source() {
        let result = CompressionConfig::new(
            "/definitely/not/here",
            None,
            FormatChoice::Keep,
            None,
            false,
            NamingStrategy::Random,
        );
        assert!(matches!(result, Err(CompressionError::SourceNotFound(_))));
    }

    #[test]
    fn test_source_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("photo.jpg");
        std::fs::write(&file, b"data").unwrap();
        let result = CompressionConfig::new(
            &file,
            None,
            FormatChoice::Keep,
            None,
            false,
            NamingStrategy::Random,
        );
        assert!(matches!(result, Err(CompressionError::NotADirectory(_))));
    }

    #[test]
    fn test_display_lists_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path(), None, FormatChoice::Keep);
        let text = config.to_string();
        assert!(text.contains("Quality: 85"));
        assert!(text.contains("Maximum width: no limit"));
        assert!(text.contains("compress-orig-keep-85/"));
    }
}
