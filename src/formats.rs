/// Image format utilities and type-safe format handling
///
/// `OutputFormat` names the encoders this tool can write; `FormatChoice`
/// is what the user asked for, which may be "keep whatever the source was".
use crate::error::{CompressionError, Result};
use image::ImageFormat;
use std::fmt;
use std::str::FromStr;

/// Supported output image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// JPEG format with lossy compression
    Jpeg,
    /// PNG format with lossless compression
    Png,
    /// WebP format, lossy at the requested quality
    WebP,
    /// Uncompressed bitmap
    Bmp,
    /// TIFF, written uncompressed
    Tiff,
}

impl OutputFormat {
    /// Returns the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// Convert to the image crate's ImageFormat
    pub fn to_image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::WebP => ImageFormat::WebP,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Tiff => ImageFormat::Tiff,
        }
    }

    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(OutputFormat::Jpeg),
            ImageFormat::Png => Some(OutputFormat::Png),
            ImageFormat::WebP => Some(OutputFormat::WebP),
            ImageFormat::Bmp => Some(OutputFormat::Bmp),
            ImageFormat::Tiff => Some(OutputFormat::Tiff),
            _ => None,
        }
    }

    /// Whether the encoder can store an alpha channel.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }

    /// Formats for which the quality setting has no effect on pixels.
    pub fn is_lossless_only(&self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Bmp | OutputFormat::Tiff)
    }

    pub fn all_formats() -> Vec<OutputFormat> {
        vec![
            OutputFormat::Jpeg,
            OutputFormat::Png,
            OutputFormat::WebP,
            OutputFormat::Bmp,
            OutputFormat::Tiff,
        ]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::WebP => "WebP",
            OutputFormat::Bmp => "BMP",
            OutputFormat::Tiff => "TIFF",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            "bmp" => Ok(OutputFormat::Bmp),
            "tiff" | "tif" => Ok(OutputFormat::Tiff),
            _ => Err(CompressionError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Requested output format for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChoice {
    /// Re-encode each image in the format it was decoded from.
    Keep,
    Convert(OutputFormat),
}

impl FormatChoice {
    /// Label used in the output directory name.
    pub fn label(&self) -> &'static str {
        match self {
            FormatChoice::Keep => "keep",
            FormatChoice::Convert(format) => format.extension(),
        }
    }

    /// The format actually written for an image decoded as `detected`.
    pub fn resolve(&self, detected: ImageFormat) -> Result<OutputFormat> {
        match self {
            FormatChoice::Convert(format) => Ok(*format),
            FormatChoice::Keep => OutputFormat::from_image_format(detected).ok_or_else(|| {
                CompressionError::UnsupportedFormat(format!(
                    "{:?} sources cannot be re-encoded in their original format",
                    detected
                ))
            }),
        }
    }
}

impl Default for FormatChoice {
    fn default() -> Self {
        FormatChoice::Convert(OutputFormat::WebP)
    }
}

impl fmt::Display for FormatChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatChoice::Keep => write!(f, "original format"),
            FormatChoice::Convert(format) => write!(f, "{}", format),
        }
    }
}

impl FromStr for FormatChoice {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "keep" | "original" => Ok(FormatChoice::Keep),
            other => OutputFormat::from_str(other).map(FormatChoice::Convert),
        }
    }
}
