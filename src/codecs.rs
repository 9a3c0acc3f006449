use crate::error::{CompressionError, Result};
use crate::formats::{FormatChoice, OutputFormat};
use tracing::debug;

/// Decode/encode availability of one format in this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecSupport {
    pub format: OutputFormat,
    pub decode: bool,
    pub encode: bool,
}

/// Reports which formats the linked codecs can read and write.
pub fn codec_support() -> Vec<CodecSupport> {
    OutputFormat::all_formats()
        .into_iter()
        .map(|format| {
            let image_format = format.to_image_format();
            let encode = match format {
                // Lossy WebP goes through libwebp, which is always linked.
                OutputFormat::WebP => true,
                _ => image_format.writing_enabled(),
            };
            CodecSupport {
                format,
                decode: image_format.reading_enabled(),
                encode,
            }
        })
        .collect()
}

/// Fails fast when a run with `choice` could not decode every walked
/// extension or could not encode its target.
pub fn ensure_available(choice: FormatChoice) -> Result<()> {
    let support = codec_support();

    let missing_decoders: Vec<String> = support
        .iter()
        .filter(|s| !s.decode)
        .map(|s| s.format.to_string())
        .collect();
    if !missing_decoders.is_empty() {
        return Err(CompressionError::DependencyMissing(format!(
            "no decoder for {}",
            missing_decoders.join(", ")
        )));
    }

    let required: Vec<OutputFormat> = match choice {
        FormatChoice::Convert(format) => vec![format],
        FormatChoice::Keep => OutputFormat::all_formats(),
    };
    for format in required {
        let available = support
            .iter()
            .any(|s| s.format == format && s.encode);
        if !available {
            return Err(CompressionError::DependencyMissing(format!(
                "no encoder for {}",
                format
            )));
        }
    }

    debug!("codec check passed for {}", choice);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_formats_listed() {
        let support = codec_support();
        assert_eq!(support.len(), OutputFormat::all_formats().len());
    }

    #[test]
    fn test_enabled_features_are_available() {
        for s in codec_support() {
            assert!(s.decode, "{} should decode", s.format);
            assert!(s.encode, "{} should encode", s.format);
        }
        assert!(ensure_available(FormatChoice::Keep).is_ok());
        assert!(ensure_available(FormatChoice::Convert(OutputFormat::WebP)).is_ok());
    }
}
