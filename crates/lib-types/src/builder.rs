//! Incremental waveform assembly.
//!
//! [`WaveformBuilder`] is the one place an empty sample sequence is allowed.
//! Transforms that stitch copies together start from an empty builder,
//! append, and call [`finish`](WaveformBuilder::finish), which restores the
//! non-empty invariant.
//!
//! # Seam rule
//!
//! When a waveform is appended with [`append_at`](WaveformBuilder::append_at),
//! its first sample may land exactly on the builder's current last time. That
//! first sample is then dropped and the earlier sample is kept. A first sample
//! landing later is kept, and one landing earlier is an error.

use crate::error::{WaveformError, WaveformResult};
use crate::waveform::Waveform;

/// Accumulates samples with strictly increasing times.
#[derive(Clone, Debug, Default)]
pub struct WaveformBuilder {
    times: Vec<f64>,
    amplitudes: Vec<f64>,
}

impl WaveformBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            amplitudes: Vec::with_capacity(capacity),
        }
    }

    /// Number of samples appended so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True until the first sample is appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the most recent sample.
    #[inline]
    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Append one sample. Its time must be finite and later than the last one.
    pub fn push(&mut self, time: f64, amplitude: f64) -> WaveformResult<()> {
        let index = self.times.len();
        if !time.is_finite() {
            return Err(WaveformError::NonFinite {
                field: "time",
                index,
                value: time,
            });
        }
        if !amplitude.is_finite() {
            return Err(WaveformError::NonFinite {
                field: "amplitude",
                index,
                value: amplitude,
            });
        }
        if let Some(previous) = self.last_time() {
            if time <= previous {
                return Err(WaveformError::NonMonotonic {
                    index,
                    previous,
                    current: time,
                });
            }
        }

        self.times.push(time);
        self.amplitudes.push(amplitude);
        Ok(())
    }

    /// Append every sample of `waveform` with its times copied verbatim,
    /// applying the seam rule to its first sample.
    pub fn append(&mut self, waveform: &Waveform) -> WaveformResult<()> {
        self.extend_seamed(waveform.samples())
    }

    /// Append `waveform` moved so that its first sample lands on `anchor`.
    ///
    /// The first sample is placed on `anchor` exactly and every later time
    /// `t` at `anchor + (t - start)`. Appending at the waveform's own start
    /// is the same as [`append`](Self::append).
    pub fn append_at(&mut self, waveform: &Waveform, anchor: f64) -> WaveformResult<()> {
        let start = waveform.start_time();
        if anchor == start {
            return self.append(waveform);
        }
        let placed = waveform
            .samples()
            .enumerate()
            .map(|(i, (t, a))| match i {
                0 => (anchor, a),
                _ => (anchor + (t - start), a),
            });
        self.extend_seamed(placed)
    }

    fn extend_seamed<I>(&mut self, mut samples: I) -> WaveformResult<()>
    where
        I: ExactSizeIterator<Item = (f64, f64)>,
    {
        self.times.reserve(samples.len());
        self.amplitudes.reserve(samples.len());

        if let Some((first_time, first_amplitude)) = samples.next() {
            if self.last_time() != Some(first_time) {
                self.push(first_time, first_amplitude)?;
            }
        }
        for (t, a) in samples {
            self.push(t, a)?;
        }
        Ok(())
    }

    /// Finish the waveform.
    ///
    /// # Errors
    ///
    /// [`WaveformError::Empty`] if nothing was appended.
    pub fn finish(self) -> WaveformResult<Waveform> {
        if self.times.is_empty() {
            return Err(WaveformError::Empty);
        }
        Ok(Waveform::from_validated(self.times, self.amplitudes))
    }
}
