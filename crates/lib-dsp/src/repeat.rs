//! Repetition, concatenation, and extension of waveforms.
//!
//! Copies are stitched with [`WaveformBuilder::append_at`], anchoring each
//! copy on the previous copy's last time. Where two copies meet at the same
//! timestamp the later copy's first sample is dropped (the seam rule), so no
//! result ever holds a duplicate time.

use crate::cut::{split, truncate_at};
use crate::error::{ensure_finite, ensure_sample_count, DspError, DspResult};
use crate::MAX_SAMPLES;
use lib_types::{Waveform, WaveformBuilder};
use serde::{Deserialize, Serialize};

/// Settings for [`extend_window_by_repeating`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendOptions {
    /// Start of the repeated window. Defaults to the waveform start.
    pub clip_start: Option<f64>,

    /// End of the repeated window. Defaults to the waveform stop.
    pub clip_end: Option<f64>,

    /// Play the samples before the window once before repeating it.
    pub keep_head: bool,
}

impl Default for ExtendOptions {
    fn default() -> Self {
        Self {
            clip_start: None,
            clip_end: None,
            keep_head: true,
        }
    }
}

/// Concatenate `n + 1` back-to-back copies of `waveform`.
///
/// The result keeps the original start time and lasts
/// `(n + 1) * duration`.
///
/// # Errors
///
/// [`DspError::InvalidArgument`] if `n < 0` or the result would hold more
/// than [`MAX_SAMPLES`] samples.
pub fn repeat_times(waveform: &Waveform, n: i64) -> DspResult<Waveform> {
    repeat_with_gap(waveform, n, 0.0)
}

/// Like [`repeat_times`], with each copy starting `gap` seconds after the
/// previous copy ends.
///
/// A zero gap applies the seam rule; a positive gap keeps every sample and
/// the signal ramps linearly across the gap.
pub fn repeat_with_gap(waveform: &Waveform, n: i64, gap: f64) -> DspResult<Waveform> {
    let extra_copies = usize::try_from(n).map_err(|_| {
        DspError::invalid_argument("n", format!("repeat count must be >= 0, got {}", n))
    })?;
    ensure_finite("gap", gap)?;
    if gap < 0.0 {
        return Err(DspError::invalid_argument(
            "gap",
            format!("must be >= 0, got {}", gap),
        ));
    }

    // Zero-duration copies all collapse onto one sample.
    if gap == 0.0 && waveform.len() == 1 {
        return Ok(waveform.clone());
    }
    let per_copy = if gap == 0.0 { waveform.len() - 1 } else { waveform.len() };
    let capacity = ensure_sample_count(
        "n",
        per_copy
            .checked_mul(extra_copies)
            .and_then(|extra| extra.checked_add(waveform.len())),
    )?;

    let mut builder = WaveformBuilder::with_capacity(capacity);
    builder.append(waveform)?;
    for _ in 0..extra_copies {
        let anchor = builder.last_time().unwrap_or(waveform.stop_time()) + gap;
        builder.append_at(waveform, anchor)?;
    }
    let repeated = builder.finish()?;

    tracing::debug!(
        "Repeated {}-sample waveform {} extra times -> {} samples",
        waveform.len(),
        extra_copies,
        repeated.len()
    );
    Ok(repeated)
}

/// Repeat `waveform` until it reaches `stop_time`, ending exactly there.
///
/// Whole copies are stitched until the repetition reaches or passes
/// `stop_time`; the excess is cut off and, if no sample lands on
/// `stop_time`, the interpolated sample at `stop_time` closes the result.
///
/// # Errors
///
/// [`DspError::InvalidArgument`] if `stop_time <= start_time(waveform)`, the
/// waveform has zero duration, or reaching `stop_time` takes more than
/// [`MAX_SAMPLES`] copies.
pub fn repeat_till_stoptime(waveform: &Waveform, stop_time: f64) -> DspResult<Waveform> {
    ensure_finite("stop_time", stop_time)?;
    if stop_time <= waveform.start_time() {
        return Err(DspError::invalid_argument(
            "stop_time",
            format!(
                "{} is not after waveform start {}",
                stop_time,
                waveform.start_time()
            ),
        ));
    }
    let duration = waveform.duration();
    if duration <= 0.0 {
        return Err(DspError::invalid_argument(
            "waveform",
            "a single-sample waveform cannot be repeated up to a stop time",
        ));
    }

    let copies = ((stop_time - waveform.start_time()) / duration).ceil().max(1.0);
    if copies > MAX_SAMPLES as f64 {
        return Err(DspError::invalid_argument(
            "stop_time",
            format!(
                "{} needs {} copies of a {} s waveform; more than {} samples",
                stop_time, copies, duration, MAX_SAMPLES
            ),
        ));
    }
    let mut extra = copies as i64 - 1;
    let mut repeated = repeat_times(waveform, extra)?;
    // Accumulated rounding can leave the last copy a hair short.
    while repeated.stop_time() < stop_time {
        extra += 1;
        repeated = repeat_times(waveform, extra)?;
    }

    truncate_at(&repeated, stop_time)
}

/// Append `second` after `first`.
///
/// `second` is moved so that its first sample lands on `first`'s last time
/// (a shift of `stop_time(first) - start_time(second)`), then the seam rule
/// applies. The result starts where `first` starts and lasts
/// `duration(first) + duration(second)`.
pub fn catenate(first: &Waveform, second: &Waveform) -> DspResult<Waveform> {
    catenate_with_gap(first, second, 0.0)
}

/// Like [`catenate`], with `second` starting `gap` seconds after `first` ends.
pub fn catenate_with_gap(first: &Waveform, second: &Waveform, gap: f64) -> DspResult<Waveform> {
    ensure_finite("gap", gap)?;
    if gap < 0.0 {
        return Err(DspError::invalid_argument(
            "gap",
            format!("must be >= 0, got {}", gap),
        ));
    }

    let mut builder = WaveformBuilder::with_capacity(first.len() + second.len());
    builder.append(first)?;
    let anchor = builder.last_time().unwrap_or(first.stop_time()) + gap;
    builder.append_at(second, anchor)?;
    Ok(builder.finish()?)
}

/// Extend `waveform` by repetition so it lasts `target_duration`.
///
/// A target no longer than the current duration returns the waveform
/// unchanged. Otherwise this is [`repeat_till_stoptime`] at
/// `start_time + target_duration`.
pub fn extend_by_repeating(waveform: &Waveform, target_duration: f64) -> DspResult<Waveform> {
    ensure_finite("target_duration", target_duration)?;
    if target_duration <= waveform.duration() {
        tracing::debug!(
            "Target duration {} does not exceed waveform duration {}; unchanged",
            target_duration,
            waveform.duration()
        );
        return Ok(waveform.clone());
    }

    repeat_till_stoptime(waveform, waveform.start_time() + target_duration)
}

/// Extend by repeating only a window of the waveform.
///
/// The window `[clip_start, clip_end]` is cut from `waveform` (nearest inner
/// samples). With `keep_head`, the samples up to the window's first sample
/// play once and the window repeats from there; otherwise the result starts
/// at the window. Either way the result lasts exactly `target_duration`,
/// which may also shorten it.
pub fn extend_window_by_repeating(
    waveform: &Waveform,
    target_duration: f64,
    options: &ExtendOptions,
) -> DspResult<Waveform> {
    ensure_finite("target_duration", target_duration)?;
    if target_duration <= 0.0 {
        return Err(DspError::invalid_argument(
            "target_duration",
            format!("must be positive, got {}", target_duration),
        ));
    }

    let clip_start = options.clip_start.unwrap_or(waveform.start_time());
    let clip_end = options.clip_end.unwrap_or(waveform.stop_time());
    let parts = split(waveform, clip_start, clip_end)?;
    let clip = &parts.body.waveform;

    // Head runs up to and including the window's first sample, so the seam
    // with the first repeated window is a shared sample.
    let head = match (options.keep_head, parts.body.start_index) {
        (true, i) if i > 0 => waveform.slice(0, i),
        _ => None,
    };
    let origin = head.as_ref().map_or(clip.start_time(), Waveform::start_time);
    let stop_time = origin + target_duration;

    tracing::debug!(
        "Extending window [{}, {}] ({} samples) to stop at {}",
        clip.start_time(),
        clip.stop_time(),
        clip.len(),
        stop_time
    );

    let Some(head) = head else {
        return repeat_till_stoptime(clip, stop_time);
    };
    if stop_time <= clip.start_time() {
        return truncate_at(&head, stop_time);
    }

    let body = repeat_till_stoptime(clip, stop_time)?;
    let mut builder = WaveformBuilder::with_capacity(head.len() + body.len());
    builder.append(&head)?;
    builder.append(&body)?;
    Ok(builder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Waveform {
        Waveform::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap()
    }

    #[test]
    fn test_repeat_zero_times_is_identity() {
        assert_eq!(repeat_times(&triangle(), 0).unwrap(), triangle());
    }

    #[test]
    fn test_repeat_dedups_seams() {
        let out = repeat_times(&triangle(), 2).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(out.amplitudes(), &[0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(out.duration(), 3.0 * triangle().duration());
    }

    #[test]
    fn test_repeat_keeps_offset_start() {
        let wf = Waveform::new(vec![1.0, 1.5, 2.0], vec![0.0, 1.0, 0.5]).unwrap();
        let out = repeat_times(&wf, 1).unwrap();
        assert_eq!(out.times(), &[1.0, 1.5, 2.0, 2.5, 3.0]);
        // Seam keeps the first copy's last amplitude.
        assert_eq!(out.amplitudes(), &[0.0, 1.0, 0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_repeat_with_gap_keeps_every_sample() {
        let out = repeat_with_gap(&triangle(), 1, 0.5).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 2.0, 2.5, 3.5, 4.5]);
    }

    #[test]
    fn test_repeat_rejects_negative_count_and_gap() {
        assert!(matches!(
            repeat_times(&triangle(), -1),
            Err(DspError::InvalidArgument { name: "n", .. })
        ));
        assert!(matches!(
            repeat_with_gap(&triangle(), 1, -0.1),
            Err(DspError::InvalidArgument { name: "gap", .. })
        ));
    }

    #[test]
    fn test_repeat_single_sample() {
        let wf = Waveform::new(vec![3.0], vec![1.0]).unwrap();
        assert_eq!(repeat_times(&wf, 4).unwrap(), wf);
    }

    #[test]
    fn test_repeat_till_stoptime_ends_on_stop() {
        let out = repeat_till_stoptime(&triangle(), 5.0).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(out.stop_time(), 5.0);

        let out = repeat_till_stoptime(&triangle(), 4.5).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 2.0, 3.0, 4.0, 4.5]);
        assert_eq!(out.amplitudes()[5], 0.5);
    }

    #[test]
    fn test_repeat_till_stoptime_inside_first_copy() {
        let out = repeat_till_stoptime(&triangle(), 1.5).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 1.5]);
        assert_eq!(out.amplitudes(), &[0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_repeat_till_stoptime_rejects_early_stop() {
        assert!(repeat_till_stoptime(&triangle(), 0.0).is_err());
        assert!(repeat_till_stoptime(&triangle(), -1.0).is_err());

        let point = Waveform::new(vec![0.0], vec![1.0]).unwrap();
        assert!(repeat_till_stoptime(&point, 1.0).is_err());
    }

    #[test]
    fn test_catenate() {
        let second = Waveform::new(vec![0.0, 0.5], vec![2.0, 3.0]).unwrap();
        let out = catenate(&triangle(), &second).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 2.0, 2.5]);
        assert_eq!(out.amplitudes(), &[0.0, 1.0, 0.0, 3.0]);
        assert_eq!(out.duration(), triangle().duration() + second.duration());
        assert_eq!(out.start_time(), 0.0);
    }

    #[test]
    fn test_catenate_second_with_offset_start() {
        let second = Waveform::new(vec![10.0, 11.0], vec![5.0, 6.0]).unwrap();
        let out = catenate(&triangle(), &second).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(out.duration(), 3.0);
    }

    #[test]
    fn test_catenate_with_gap() {
        let out = catenate_with_gap(&triangle(), &triangle(), 1.0).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(out.amplitudes(), &[0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_extend_shorter_target_is_noop() {
        assert_eq!(extend_by_repeating(&triangle(), 1.0).unwrap(), triangle());
        assert_eq!(extend_by_repeating(&triangle(), 2.0).unwrap(), triangle());
        assert_eq!(extend_by_repeating(&triangle(), -3.0).unwrap(), triangle());
    }

    #[test]
    fn test_extend_by_repeating() {
        let wf = Waveform::new(vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 0.0]).unwrap();
        let out = extend_by_repeating(&wf, 5.0).unwrap();
        assert_eq!(out.start_time(), 1.0);
        assert_eq!(out.stop_time(), 6.0);
        assert_eq!(out.duration(), 5.0);
    }

    #[test]
    fn test_extend_window_keeps_head() {
        // Ramp up once, then loop the plateau ripple.
        let wf = Waveform::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 1.0, 1.2, 1.0],
        )
        .unwrap();
        let opts = ExtendOptions {
            clip_start: Some(1.0),
            clip_end: Some(3.0),
            keep_head: true,
        };
        let out = extend_window_by_repeating(&wf, 6.0, &opts).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(out.amplitudes(), &[0.0, 1.0, 1.2, 1.0, 1.2, 1.0, 1.2]);
    }

    #[test]
    fn test_extend_window_without_head() {
        let wf = Waveform::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 1.0, 1.2, 1.0],
        )
        .unwrap();
        let opts = ExtendOptions {
            clip_start: Some(1.0),
            clip_end: Some(3.0),
            keep_head: false,
        };
        let out = extend_window_by_repeating(&wf, 3.0, &opts).unwrap();
        assert_eq!(out.times(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(out.amplitudes(), &[1.0, 1.2, 1.0, 1.2]);
    }

    #[test]
    fn test_extend_window_target_inside_head() {
        let wf = Waveform::new(vec![0.0, 2.0, 3.0], vec![0.0, 2.0, 1.0]).unwrap();
        let opts = ExtendOptions {
            clip_start: Some(2.0),
            ..Default::default()
        };
        let out = extend_window_by_repeating(&wf, 1.0, &opts).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0]);
        assert_eq!(out.amplitudes(), &[0.0, 1.0]);
    }

    #[test]
    fn test_extend_window_rejects_bad_target() {
        assert!(extend_window_by_repeating(&triangle(), 0.0, &ExtendOptions::default()).is_err());
    }

    #[test]
    fn test_catenate_keeps_first_times_exactly() {
        let first = Waveform::new(vec![-0.037, 0.026], vec![0.0, 1.0]).unwrap();
        let second = Waveform::new(vec![0.0, 1.0], vec![1.0, 2.0]).unwrap();

        let out = catenate(&first, &second).unwrap();
        assert_eq!(&out.times()[..2], first.times());
        assert_eq!(out.len(), 3);
        assert_eq!(out.amplitudes(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_huge_repeat_count_is_rejected() {
        assert!(matches!(
            repeat_times(&triangle(), i64::MAX),
            Err(DspError::InvalidArgument { name: "n", .. })
        ));
        assert!(matches!(
            repeat_with_gap(&triangle(), i64::MAX, 1.0),
            Err(DspError::InvalidArgument { name: "n", .. })
        ));

        let point = Waveform::new(vec![3.0], vec![1.0]).unwrap();
        assert_eq!(repeat_times(&point, i64::MAX).unwrap(), point);
    }

    #[test]
    fn test_far_stop_time_is_rejected() {
        assert!(matches!(
            repeat_till_stoptime(&triangle(), 1e300),
            Err(DspError::InvalidArgument { name: "stop_time", .. })
        ));
        assert!(extend_by_repeating(&triangle(), 1e300).is_err());
    }

    #[test]
    fn test_extend_options_from_json() {
        let opts: ExtendOptions = serde_json::from_str(r#"{"clip_start": 1e-9}"#).unwrap();
        assert_eq!(opts.clip_start, Some(1e-9));
        assert_eq!(opts.clip_end, None);
        assert!(opts.keep_head);
    }
}
