//! Time-grid interpolation of piecewise-linear waveforms.
//!
//! Between two breakpoints the amplitude is the straight line joining them.
//! Outside the waveform's span the caller chooses the value through
//! [`Extrapolation`]; nothing is extrapolated implicitly.

use crate::error::{ensure_finite, DspError, DspResult};
use crate::MAX_SAMPLES;
use lib_types::Waveform;
use serde::{Deserialize, Serialize};

/// Values returned for query times outside the source waveform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extrapolation {
    /// Amplitude for times before the first sample.
    pub left: f64,

    /// Amplitude for times after the last sample.
    pub right: f64,
}

impl Default for Extrapolation {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Extrapolation {
    /// Zero on both sides.
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
    };

    /// The same constant on both sides.
    pub fn constant(value: f64) -> Self {
        Self {
            left: value,
            right: value,
        }
    }

    /// Hold the waveform's first and last amplitudes.
    pub fn hold(waveform: &Waveform) -> Self {
        Self {
            left: waveform.start_amplitude(),
            right: waveform.stop_amplitude(),
        }
    }
}

/// Resample `waveform` onto `new_times`.
///
/// Query times matching an existing sample return its amplitude exactly.
///
/// # Errors
///
/// [`DspError::InvalidArgument`] if `new_times` is empty, not strictly
/// increasing, or holds a non-finite time.
pub fn interpolate(
    waveform: &Waveform,
    new_times: &[f64],
    extrapolation: &Extrapolation,
) -> DspResult<Waveform> {
    validate_grid(new_times)?;

    let times = waveform.times();
    let amplitudes = waveform.amplitudes();
    let result: Vec<f64> = new_times
        .iter()
        .map(|&t| interpolate_single(times, amplitudes, t, extrapolation))
        .collect();

    Ok(Waveform::new(new_times.to_vec(), result)?)
}

/// Amplitude of `waveform` at a single time.
pub fn value_at(waveform: &Waveform, t: f64, extrapolation: &Extrapolation) -> DspResult<f64> {
    ensure_finite("t", t)?;
    Ok(interpolate_single(
        waveform.times(),
        waveform.amplitudes(),
        t,
        extrapolation,
    ))
}

/// Resample onto a uniform grid spanning the waveform.
///
/// The grid starts at the first sample and steps by `step` up to the last
/// sample; see [`uniform_grid`].
pub fn resample_uniform(
    waveform: &Waveform,
    step: f64,
    extrapolation: &Extrapolation,
) -> DspResult<Waveform> {
    let grid = uniform_grid(waveform.start_time(), waveform.stop_time(), step)?;
    tracing::debug!(
        "Resampling {} samples onto {} uniform points (step {})",
        waveform.len(),
        grid.len(),
        step
    );
    interpolate(waveform, &grid, extrapolation)
}

/// Generate `start, start + step, ...` up to and including `stop`.
///
/// Points are computed as `start + i * step`, so no error accumulates along
/// the grid. A final point within `1e-9 * step` of `stop` is included and
/// clamped onto `stop`.
pub fn uniform_grid(start: f64, stop: f64, step: f64) -> DspResult<Vec<f64>> {
    ensure_finite("start", start)?;
    ensure_finite("stop", stop)?;
    ensure_finite("step", step)?;
    if step <= 0.0 {
        return Err(DspError::invalid_argument(
            "step",
            format!("must be positive, got {}", step),
        ));
    }
    if stop < start {
        return Err(DspError::invalid_argument(
            "stop",
            format!("{} is before start {}", stop, start),
        ));
    }

    let intervals = ((stop - start) / step + 1e-9).floor();
    if intervals >= MAX_SAMPLES as f64 {
        return Err(DspError::invalid_argument(
            "step",
            format!(
                "{} over [{}, {}] gives more than {} points",
                step, start, stop, MAX_SAMPLES
            ),
        ));
    }
    let intervals = intervals as usize;
    Ok((0..=intervals)
        .map(|i| (start + i as f64 * step).min(stop))
        .collect())
}

/// Interpolate a single time point.
fn interpolate_single(times: &[f64], amplitudes: &[f64], target: f64, ex: &Extrapolation) -> f64 {
    let last = times.len() - 1;
    if target < times[0] {
        return ex.left;
    }
    if target > times[last] {
        return ex.right;
    }

    // First sample at or after the target.
    let upper = times.partition_point(|&t| t < target);
    if times[upper] == target {
        return amplitudes[upper];
    }
    let lower = upper - 1;

    let t0 = times[lower];
    let t1 = times[upper];
    let frac = (target - t0) / (t1 - t0);
    amplitudes[lower] + frac * (amplitudes[upper] - amplitudes[lower])
}

fn validate_grid(new_times: &[f64]) -> DspResult<()> {
    if new_times.is_empty() {
        return Err(DspError::invalid_argument("new_times", "grid is empty"));
    }
    if let Some(index) = new_times.iter().position(|t| !t.is_finite()) {
        return Err(DspError::invalid_argument(
            "new_times",
            format!("non-finite time at index {}", index),
        ));
    }
    if let Some(index) = new_times.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(DspError::invalid_argument(
            "new_times",
            format!(
                "not strictly increasing at index {}: {} followed by {}",
                index + 1,
                new_times[index],
                new_times[index + 1]
            ),
        ));
    }
    Ok(())
}
