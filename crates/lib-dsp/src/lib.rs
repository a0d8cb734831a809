//! # lib-dsp
//!
//! Waveform operations for the PWL toolkit.
//!
//! Every function takes its inputs by reference and returns a new
//! [`lib_types::Waveform`]; nothing is modified in place.
//!
//! - **Transforms**: amplitude scaling, time stretching, window fitting
//! - **Cut**: slicing by time range with index bookkeeping
//! - **Repeat**: repetition, concatenation, and extension with seam handling
//! - **Interpolation**: resampling onto arbitrary or uniform time grids
//! - **Combine**: pointwise addition on a common grid

/// Largest waveform an operation will build (2^28 samples, 4 GiB of columns).
pub const MAX_SAMPLES: usize = 1 << 28;

pub mod error;
pub mod transform;
pub mod cut;
pub mod repeat;
pub mod interpolation;
pub mod combine;

pub use error::{DspError, DspResult};
pub use transform::{fit_to_window, scale_amplitude, shift_time, WindowOptions};
pub use cut::{cut, split, Cut, Split};
pub use repeat::{
    catenate, catenate_with_gap, extend_by_repeating, extend_window_by_repeating, repeat_till_stoptime,
    repeat_times, repeat_with_gap, ExtendOptions,
};
pub use interpolation::{interpolate, resample_uniform, uniform_grid, value_at, Extrapolation};
pub use combine::{add, add_with};
