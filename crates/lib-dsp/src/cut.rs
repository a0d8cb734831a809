//! Slicing waveforms by time range.
//!
//! # Boundary rule
//!
//! A cut keeps the existing samples whose time lies in `[start, end]`. When
//! no sample sits exactly on a boundary, the slice begins and ends at the
//! nearest samples inside the range; no interpolated boundary sample is
//! synthesized. The returned indices are inclusive on both ends, so
//! `source.slice(cut.start_index, cut.end_index) == Some(cut.waveform)`.

use crate::error::{ensure_finite, DspError, DspResult};
use crate::interpolation::{value_at, Extrapolation};
use lib_types::{Waveform, WaveformBuilder};

/// A slice of a waveform and where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Cut {
    /// The samples inside the range.
    pub waveform: Waveform,

    /// Index of the first kept sample in the source.
    pub start_index: usize,

    /// Index of the last kept sample in the source (inclusive).
    pub end_index: usize,
}

/// A waveform divided around a cut range.
#[derive(Clone, Debug, PartialEq)]
pub struct Split {
    /// Samples strictly before the range, if any.
    pub head: Option<Waveform>,

    /// Samples inside the range.
    pub body: Cut,

    /// Samples strictly after the range, if any.
    pub tail: Option<Waveform>,
}

/// Keep the samples of `waveform` with time in `[start, end]`.
///
/// # Errors
///
/// [`DspError::InvalidArgument`] if `start >= end`, if the range does not
/// intersect the waveform's span, or if no sample falls inside it.
pub fn cut(waveform: &Waveform, start: f64, end: f64) -> DspResult<Cut> {
    ensure_finite("start", start)?;
    ensure_finite("end", end)?;
    if start >= end {
        return Err(DspError::invalid_argument(
            "range",
            format!("start {} must be before end {}", start, end),
        ));
    }
    if end < waveform.start_time() || start > waveform.stop_time() {
        return Err(DspError::invalid_argument(
            "range",
            format!(
                "[{}, {}] does not intersect waveform span [{}, {}]",
                start,
                end,
                waveform.start_time(),
                waveform.stop_time()
            ),
        ));
    }

    let times = waveform.times();
    let first = times.partition_point(|&t| t < start);
    let past_last = times.partition_point(|&t| t <= end);
    if first >= past_last {
        return Err(DspError::invalid_argument(
            "range",
            format!("[{}, {}] contains no samples", start, end),
        ));
    }

    let end_index = past_last - 1;
    let slice = waveform
        .slice(first, end_index)
        .ok_or_else(|| DspError::invalid_argument("range", "slice out of bounds"))?;

    Ok(Cut {
        waveform: slice,
        start_index: first,
        end_index,
    })
}

/// Cut `[start, end]` and also return the samples on either side of it.
pub fn split(waveform: &Waveform, start: f64, end: f64) -> DspResult<Split> {
    let body = cut(waveform, start, end)?;
    let head = match body.start_index {
        0 => None,
        i => waveform.slice(0, i - 1),
    };
    let tail = waveform.slice(body.end_index + 1, waveform.len() - 1);

    Ok(Split { head, body, tail })
}

/// Drop everything after `stop` and end exactly on it.
///
/// When no sample sits on `stop`, the interpolated sample at `stop` is
/// appended, so the result's last time is `stop`. Requires
/// `start_time < stop`.
pub(crate) fn truncate_at(waveform: &Waveform, stop: f64) -> DspResult<Waveform> {
    if stop >= waveform.stop_time() {
        return Ok(waveform.clone());
    }

    let kept = cut(waveform, waveform.start_time(), stop)?.waveform;
    if kept.stop_time() == stop {
        return Ok(kept);
    }

    let end_value = value_at(waveform, stop, &Extrapolation::hold(waveform))?;
    let mut builder = WaveformBuilder::with_capacity(kept.len() + 1);
    builder.append(&kept)?;
    builder.push(stop, end_value)?;
    Ok(builder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staircase() -> Waveform {
        Waveform::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn test_cut_clips_to_nearest_inner_samples() {
        let c = cut(&staircase(), 0.5, 2.5).unwrap();
        assert_eq!(c.waveform.times(), &[1.0, 2.0]);
        assert_eq!(c.waveform.amplitudes(), &[1.0, 2.0]);
        assert_eq!((c.start_index, c.end_index), (1, 2));
    }

    #[test]
    fn test_cut_includes_exact_boundaries() {
        let c = cut(&staircase(), 1.0, 3.0).unwrap();
        assert_eq!(c.waveform.times(), &[1.0, 2.0, 3.0]);
        assert_eq!((c.start_index, c.end_index), (1, 3));
    }

    #[test]
    fn test_cut_range_wider_than_waveform() {
        let c = cut(&staircase(), -10.0, 10.0).unwrap();
        assert_eq!(c.waveform, staircase());
        assert_eq!((c.start_index, c.end_index), (0, 3));
    }

    #[test]
    fn test_cut_indices_reproduce_slice() {
        let wf = staircase();
        let c = cut(&wf, 0.2, 2.0).unwrap();
        assert_eq!(wf.slice(c.start_index, c.end_index), Some(c.waveform));
    }

    #[test]
    fn test_cut_rejects_reversed_or_empty_range() {
        assert!(matches!(
            cut(&staircase(), 2.0, 1.0),
            Err(DspError::InvalidArgument { name: "range", .. })
        ));
        assert!(cut(&staircase(), 1.0, 1.0).is_err());
    }

    #[test]
    fn test_cut_rejects_disjoint_range() {
        assert!(cut(&staircase(), 4.0, 5.0).is_err());
        assert!(cut(&staircase(), -2.0, -1.0).is_err());
    }

    #[test]
    fn test_cut_rejects_range_between_samples() {
        assert!(cut(&staircase(), 1.2, 1.8).is_err());
    }

    #[test]
    fn test_split_head_and_tail() {
        let s = split(&staircase(), 0.5, 2.5).unwrap();
        assert_eq!(s.head.unwrap().times(), &[0.0]);
        assert_eq!(s.body.waveform.times(), &[1.0, 2.0]);
        assert_eq!(s.tail.unwrap().times(), &[3.0]);

        let s = split(&staircase(), 0.0, 3.0).unwrap();
        assert!(s.head.is_none());
        assert!(s.tail.is_none());
    }

    #[test]
    fn test_truncate_interpolates_end() {
        let out = truncate_at(&staircase(), 2.5).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 2.0, 2.5]);
        assert_eq!(out.amplitudes(), &[0.0, 1.0, 2.0, 2.5]);

        let out = truncate_at(&staircase(), 2.0).unwrap();
        assert_eq!(out.times(), &[0.0, 1.0, 2.0]);
    }
}
