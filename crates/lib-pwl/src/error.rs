//! Error types for PWL file reading and writing.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading or writing PWL text.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The source file does not exist.
    #[error("PWL file not found: {path:?}")]
    NotFound { path: PathBuf },

    /// I/O failure reading or writing a file.
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A retained line is not a `<time> <amplitude>` pair.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The file as a whole does not describe a valid waveform.
    #[error("Invalid PWL format at line {line}: {message}")]
    InvalidFormat { line: usize, message: String },
}

impl CodecError {
    /// Create a syntax error at a specific location.
    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a format error anchored at a line.
    pub fn invalid_format(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            line,
            message: message.into(),
        }
    }

    /// Classify an I/O error for `path`, separating a missing file.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// True for errors caused by the file content rather than the file system.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::InvalidFormat { .. })
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
