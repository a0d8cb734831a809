//! Error types for waveform operations.

use crate::MAX_SAMPLES;
use lib_types::WaveformError;
use thiserror::Error;

/// Errors that can occur during waveform operations.
#[derive(Debug, Error)]
pub enum DspError {
    /// A caller-supplied parameter violates a precondition.
    #[error("Invalid argument `{name}`: {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// The produced waveform would violate the waveform invariants.
    #[error("Invalid waveform: {0}")]
    InvalidWaveform(#[from] WaveformError),
}

impl DspError {
    /// Create an invalid argument error.
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }
}

/// Result type for waveform operations.
pub type DspResult<T> = Result<T, DspError>;

/// Reject NaN and infinite parameters.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> DspResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DspError::invalid_argument(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

/// Accept a planned output size of at most [`MAX_SAMPLES`]; `None` means the
/// count overflowed.
pub(crate) fn ensure_sample_count(name: &'static str, count: Option<usize>) -> DspResult<usize> {
    match count {
        Some(n) if n <= MAX_SAMPLES => Ok(n),
        _ => Err(DspError::invalid_argument(
            name,
            format!("result would exceed {} samples", MAX_SAMPLES),
        )),
    }
}
