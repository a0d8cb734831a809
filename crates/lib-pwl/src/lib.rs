//! # lib-pwl
//!
//! PWL text codec for the waveform toolkit.
//!
//! This crate reads and writes the two-column piecewise-linear text format
//! used by circuit simulators:
//! - [`read_pwl`] / [`parse_pwl`]: text to [`lib_types::Waveform`]
//! - [`write_pwl`] / [`format_pwl`]: [`lib_types::Waveform`] to text
//!
//! Line parsing is built on the `nom` parser combinator library. With the
//! default options a write followed by a read reproduces the waveform
//! exactly.

pub mod error;
pub mod options;
pub mod reader;
pub mod writer;

pub use error::{CodecError, CodecResult};
pub use options::{ReadOptions, WriteOptions};
pub use reader::{parse_pwl, read_pwl};
pub use writer::{format_pwl, write_pwl};
