//! Piecewise-linear time-domain waveform representation.
//!
//! A [`Waveform`] is a finite list of `(time, amplitude)` breakpoints. The
//! signal between two breakpoints is the straight line joining them.
//!
//! # Invariants
//!
//! Every `Waveform` value satisfies:
//!
//! - at least one sample;
//! - the same number of times and amplitudes;
//! - every time and amplitude is finite;
//! - times strictly increasing (no duplicates, no reordering).
//!
//! Construction is the only place these are checked. Fields are private and
//! no method mutates a waveform in place, so a value that exists is valid.
//! Operations produce new waveforms instead of editing existing ones.
//!
//! Time is in seconds and amplitude is an arbitrary real signal level; no
//! unit conversion happens at this layer.

use crate::error::{WaveformError, WaveformResult};
use serde::{Deserialize, Serialize};

/// An immutable piecewise-linear waveform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WaveformData", into = "WaveformData")]
pub struct Waveform {
    times: Vec<f64>,
    amplitudes: Vec<f64>,
}

/// Unvalidated column form of a waveform, used for (de)serialization.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WaveformData {
    /// Sample times in seconds.
    pub times: Vec<f64>,

    /// Sample amplitudes.
    pub amplitudes: Vec<f64>,
}

impl Waveform {
    /// Create a waveform from parallel time and amplitude columns.
    ///
    /// # Errors
    ///
    /// - [`WaveformError::LengthMismatch`] if the columns differ in length
    /// - [`WaveformError::Empty`] if there are no samples
    /// - [`WaveformError::NonFinite`] for NaN or infinite values
    /// - [`WaveformError::NonMonotonic`] if times are not strictly increasing
    pub fn new(times: Vec<f64>, amplitudes: Vec<f64>) -> WaveformResult<Self> {
        validate(&times, &amplitudes)?;
        Ok(Self { times, amplitudes })
    }

    /// Create a waveform from `(time, amplitude)` pairs.
    pub fn from_samples<I>(samples: I) -> WaveformResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (times, amplitudes) = samples.into_iter().unzip();
        Self::new(times, amplitudes)
    }

    /// Wrap columns that the caller has already validated.
    pub(crate) fn from_validated(times: Vec<f64>, amplitudes: Vec<f64>) -> Self {
        debug_assert!(validate(&times, &amplitudes).is_ok());
        Self { times, amplitudes }
    }

    /// Number of samples. Always at least one.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Sample times, strictly increasing.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Sample amplitudes, aligned with [`times`](Self::times).
    #[inline]
    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    /// Iterate over `(time, amplitude)` pairs in time order.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.amplitudes.iter().copied())
    }

    /// The `(time, amplitude)` pair at `index`, if any.
    #[inline]
    pub fn sample(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.times.get(index)?, *self.amplitudes.get(index)?))
    }

    /// Time of the first sample.
    #[inline]
    pub fn start_time(&self) -> f64 {
        self.times[0]
    }

    /// Time of the last sample.
    #[inline]
    pub fn stop_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Span from the first to the last sample. Zero for a single sample.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.stop_time() - self.start_time()
    }

    /// Amplitude of the first sample.
    #[inline]
    pub fn start_amplitude(&self) -> f64 {
        self.amplitudes[0]
    }

    /// Amplitude of the last sample.
    #[inline]
    pub fn stop_amplitude(&self) -> f64 {
        self.amplitudes[self.amplitudes.len() - 1]
    }

    /// Smallest amplitude.
    pub fn min_amplitude(&self) -> f64 {
        self.amplitudes.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest amplitude.
    pub fn max_amplitude(&self) -> f64 {
        self.amplitudes
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Peak-to-peak amplitude.
    pub fn peak_to_peak(&self) -> f64 {
        self.max_amplitude() - self.min_amplitude()
    }

    /// Samples `first..=last` as a new waveform.
    ///
    /// Returns `None` if `first > last` or `last` is out of bounds. Any
    /// contiguous run of a valid waveform is itself valid.
    pub fn slice(&self, first: usize, last: usize) -> Option<Self> {
        if first > last || last >= self.len() {
            return None;
        }
        Some(Self::from_validated(
            self.times[first..=last].to_vec(),
            self.amplitudes[first..=last].to_vec(),
        ))
    }

    /// Consume the waveform and return its `(times, amplitudes)` columns.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.times, self.amplitudes)
    }
}

impl TryFrom<WaveformData> for Waveform {
    type Error = WaveformError;

    fn try_from(data: WaveformData) -> WaveformResult<Self> {
        Self::new(data.times, data.amplitudes)
    }
}

impl From<Waveform> for WaveformData {
    fn from(waveform: Waveform) -> Self {
        let (times, amplitudes) = waveform.into_parts();
        Self { times, amplitudes }
    }
}

/// Check the waveform invariants over raw columns.
pub fn validate(times: &[f64], amplitudes: &[f64]) -> WaveformResult<()> {
    if times.len() != amplitudes.len() {
        return Err(WaveformError::LengthMismatch {
            times: times.len(),
            amplitudes: amplitudes.len(),
        });
    }
    if times.is_empty() {
        return Err(WaveformError::Empty);
    }

    for (index, (&t, &a)) in times.iter().zip(amplitudes).enumerate() {
        if !t.is_finite() {
            return Err(WaveformError::NonFinite {
                field: "time",
                index,
                value: t,
            });
        }
        if !a.is_finite() {
            return Err(WaveformError::NonFinite {
                field: "amplitude",
                index,
                value: a,
            });
        }
    }

    if let Some(index) = times.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(WaveformError::NonMonotonic {
            index: index + 1,
            previous: times[index],
            current: times[index + 1],
        });
    }

    Ok(())
}
