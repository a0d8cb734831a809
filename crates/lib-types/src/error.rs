//! Error types for waveform construction.

use thiserror::Error;

/// Violations of the waveform invariants.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WaveformError {
    /// A waveform needs at least one sample.
    #[error("Waveform must contain at least one sample")]
    Empty,

    /// Time and amplitude columns differ in length.
    #[error("Length mismatch: {times} times, {amplitudes} amplitudes")]
    LengthMismatch { times: usize, amplitudes: usize },

    /// A time or amplitude is NaN or infinite.
    #[error("Non-finite {field} at sample {index}: {value}")]
    NonFinite {
        field: &'static str,
        index: usize,
        value: f64,
    },

    /// Times are not strictly increasing.
    #[error("Time not strictly increasing at sample {index}: {previous} followed by {current}")]
    NonMonotonic {
        index: usize,
        previous: f64,
        current: f64,
    },
}

/// Result type for waveform construction.
pub type WaveformResult<T> = Result<T, WaveformError>;
