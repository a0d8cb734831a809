//! Amplitude scaling and time-axis remapping.

use crate::cut::truncate_at;
use crate::error::{ensure_finite, DspError, DspResult};
use lib_types::{Waveform, WaveformBuilder};
use serde::{Deserialize, Serialize};

/// Settings for [`fit_to_window`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Time at which the waveform's first sample is placed.
    pub delay: f64,

    /// Amplitude at time zero when `delay > 0`. Defaults to the first
    /// amplitude, which holds the signal flat until the delay.
    pub before_value: Option<f64>,

    /// Amplitude at `stop_time` when the waveform ends early. Defaults to
    /// the last amplitude.
    pub after_value: Option<f64>,
}

/// Multiply every amplitude by `factor`. Times are unchanged.
pub fn scale_amplitude(waveform: &Waveform, factor: f64) -> DspResult<Waveform> {
    ensure_finite("factor", factor)?;
    let amplitudes = waveform.amplitudes().iter().map(|a| a * factor).collect();
    Ok(Waveform::new(waveform.times().to_vec(), amplitudes)?)
}

/// Stretch the time axis to span `new_duration`, starting at `delay`.
///
/// Each time maps to `delay + (t - start) / duration * new_duration`. The
/// first sample lands on `delay` and the last on `delay + new_duration`.
///
/// # Errors
///
/// [`DspError::InvalidArgument`] if `new_duration <= 0` or the waveform
/// has a single sample (zero duration cannot be stretched).
pub fn shift_time(waveform: &Waveform, new_duration: f64, delay: f64) -> DspResult<Waveform> {
    ensure_finite("new_duration", new_duration)?;
    ensure_finite("delay", delay)?;
    if new_duration <= 0.0 {
        return Err(DspError::invalid_argument(
            "new_duration",
            format!("must be positive, got {}", new_duration),
        ));
    }
    let duration = waveform.duration();
    if duration <= 0.0 {
        return Err(DspError::invalid_argument(
            "waveform",
            "a single-sample waveform has no duration to rescale",
        ));
    }

    let start = waveform.start_time();
    let times = waveform
        .times()
        .iter()
        .map(|&t| delay + (t - start) / duration * new_duration)
        .collect();
    Ok(Waveform::new(times, waveform.amplitudes().to_vec())?)
}

/// Place the waveform inside the window `[0, stop_time]`.
///
/// The waveform is moved to begin at `options.delay`. If the delay is
/// positive, a sample at time zero with `before_value` opens the window. A
/// waveform running past `stop_time` is cut there (with an interpolated end
/// sample); one ending early is closed with `after_value` at `stop_time`.
/// When `stop_time <= delay` nothing of the waveform fits and the result is
/// the flat `[(0, before), (stop_time, before)]`.
///
/// # Errors
///
/// [`DspError::InvalidArgument`] if `stop_time <= 0` or `delay < 0`.
pub fn fit_to_window(
    waveform: &Waveform,
    stop_time: f64,
    options: &WindowOptions,
) -> DspResult<Waveform> {
    ensure_finite("stop_time", stop_time)?;
    ensure_finite("delay", options.delay)?;
    if stop_time <= 0.0 {
        return Err(DspError::invalid_argument(
            "stop_time",
            format!("must be positive, got {}", stop_time),
        ));
    }
    if options.delay < 0.0 {
        return Err(DspError::invalid_argument(
            "delay",
            format!("must be >= 0, got {}", options.delay),
        ));
    }

    let delay = options.delay;
    let before = options.before_value.unwrap_or(waveform.start_amplitude());
    let after = options.after_value.unwrap_or(waveform.stop_amplitude());

    if stop_time <= delay {
        tracing::warn!(
            "Window stop {} is not after delay {}; waveform dropped entirely",
            stop_time,
            delay
        );
        return Ok(Waveform::new(vec![0.0, stop_time], vec![before, before])?);
    }

    let mut placed = WaveformBuilder::with_capacity(waveform.len());
    placed.append_at(waveform, delay)?;
    let placed = placed.finish()?;

    let body = if placed.stop_time() > stop_time {
        tracing::debug!(
            "Waveform ends at {}, truncating to window stop {}",
            placed.stop_time(),
            stop_time
        );
        truncate_at(&placed, stop_time)?
    } else {
        placed
    };

    let mut builder = WaveformBuilder::with_capacity(body.len() + 2);
    if delay > 0.0 {
        builder.push(0.0, before)?;
    }
    builder.append(&body)?;
    if builder.last_time().map_or(true, |last| last < stop_time) {
        builder.push(stop_time, after)?;
    }
    Ok(builder.finish()?)
}
