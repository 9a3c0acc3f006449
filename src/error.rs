use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode {format}: {reason}")]
    Encode { format: String, reason: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid maximum width: {0}. Must be a positive number of pixels")]
    InvalidWidth(u32),

    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to create output directory {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Output storage exhausted while writing {path}: {source}")]
    OutputExhausted {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image codec support missing: {0}")]
    DependencyMissing(String),

    #[error("Walkdir error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

/// Coarse classification used for per-file results and the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureKind {
    Decode,
    Encode,
    Io,
    Fatal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Decode => "decode error",
            FailureKind::Encode => "encode error",
            FailureKind::Io => "I/O error",
            FailureKind::Fatal => "fatal run error",
        };
        write!(f, "{}", name)
    }
}

impl CompressionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CompressionError::Decode(_) => FailureKind::Decode,
            CompressionError::Encode { .. } | CompressionError::UnsupportedFormat(_) => {
                FailureKind::Encode
            }
            CompressionError::DirectoryCreationFailed { .. }
            | CompressionError::OutputExhausted { .. }
            | CompressionError::DependencyMissing(_) => FailureKind::Fatal,
            _ => FailureKind::Io,
        }
    }

    /// True for errors that must stop the remaining run.
    pub fn is_fatal(&self) -> bool {
        self.kind() == FailureKind::Fatal
    }

    pub fn encode(format: impl fmt::Display, reason: impl fmt::Display) -> Self {
        CompressionError::Encode {
            format: format.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Storage conditions after which writing further files is pointless.
pub fn is_storage_exhausted(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::StorageFull | io::ErrorKind::ReadOnlyFilesystem
    )
}

pub type Result<T> = std::result::Result<T, CompressionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = CompressionError::encode("WebP", "bad layout");
        assert_eq!(err.kind(), FailureKind::Encode);
        assert!(!err.is_fatal());

        let err = CompressionError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert_eq!(err.kind(), FailureKind::Io);

        let err = CompressionError::DirectoryCreationFailed {
            path: PathBuf::from("/out"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        };
        assert!(err.is_fatal());
    }

    #[test]
    fn test_storage_exhausted() {
        assert!(is_storage_exhausted(&io::Error::from(io::ErrorKind::StorageFull)));
        assert!(!is_storage_exhausted(&io::Error::from(io::ErrorKind::NotFound)));
    }

    #[test]
    fn test_error_messages() {
        let err = CompressionError::InvalidQuality(0);
        assert_eq!(
            err.to_string(),
            "Invalid quality value: 0. Must be between 1 and 100"
        );
        assert_eq!(FailureKind::Decode.to_string(), "decode error");
    }
}
