//! Pointwise combination of two waveforms.
//!
//! # Grid contract
//!
//! Addition is evaluated on the first operand's time grid. The second
//! operand is resampled onto those times (zero outside its span unless an
//! [`Extrapolation`] is given) and summed. The result therefore always has
//! exactly the first operand's sample count and timestamps, and `add(a, b)`
//! differs from `add(b, a)` whenever the grids differ: breakpoints of the
//! second operand that fall between grid points are not represented.

use crate::error::DspResult;
use crate::interpolation::{interpolate, Extrapolation};
use lib_types::Waveform;

/// Add `second` to `first` on `first`'s time grid.
pub fn add(first: &Waveform, second: &Waveform) -> DspResult<Waveform> {
    add_with(first, second, &Extrapolation::default())
}

/// Add `second` to `first` on `first`'s time grid, using `extrapolation`
/// for grid times outside `second`'s span.
pub fn add_with(
    first: &Waveform,
    second: &Waveform,
    extrapolation: &Extrapolation,
) -> DspResult<Waveform> {
    let resampled = interpolate(second, first.times(), extrapolation)?;
    let sum = first
        .amplitudes()
        .iter()
        .zip(resampled.amplitudes())
        .map(|(a, b)| a + b)
        .collect();

    Ok(Waveform::new(first.times().to_vec(), sum)?)
}
