//! # lib-types
//!
//! Core type definitions for the PWL waveform toolkit.
//!
//! This crate provides the value type every other crate exchanges:
//! - [`Waveform`]: an immutable, invariant-checked piecewise-linear waveform
//! - [`WaveformBuilder`]: seam-aware incremental assembly used by transforms
//! - [`WaveformError`]: the invariant violations construction can report

pub mod error;
pub mod waveform;
pub mod builder;

pub use error::{WaveformError, WaveformResult};
pub use waveform::*;
pub use builder::WaveformBuilder;
