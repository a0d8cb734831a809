//! Reader and writer settings.
//!
//! Both structs deserialize with `#[serde(default)]`, so a config file only
//! needs to name the fields it changes.

use serde::{Deserialize, Serialize};

/// How to interpret a PWL text file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Leading lines (headers, comments, a PWL definition) to drop.
    pub skip_start_lines: usize,

    /// Trailing lines (simulator footers, terminators) to drop.
    pub ignore_end_lines: usize,

    /// SPICE continuation symbol stripped from the start of a data line.
    pub continuation: Option<char>,

    /// Multiplier applied to every parsed time.
    pub time_scale: f64,

    /// Multiplier applied to every parsed amplitude.
    pub amplitude_scale: f64,

    /// Accept engineering suffixes such as `10ns` or `3.3mV` on values.
    pub scale_suffixes: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            skip_start_lines: 0,
            ignore_end_lines: 0,
            continuation: Some('+'),
            time_scale: 1.0,
            amplitude_scale: 1.0,
            scale_suffixes: false,
        }
    }
}

impl ReadOptions {
    /// Options that drop `skip_start_lines` leading and `ignore_end_lines`
    /// trailing lines, with every other setting at its default.
    pub fn with_skips(skip_start_lines: usize, ignore_end_lines: usize) -> Self {
        Self {
            skip_start_lines,
            ignore_end_lines,
            ..Default::default()
        }
    }
}

/// Layout of written PWL text.
///
/// The default is the bare two-column form: one `time amplitude` line per
/// sample, no header, no footer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Line written before everything else, e.g. `# s A`.
    pub header: Option<String>,

    /// PWL source definition written after the header, e.g. `V1 in 0 PWL`.
    pub definition: Option<String>,

    /// Text written after the last sample line.
    pub footer: Option<String>,

    /// Continuation prefix for sample lines. The first sample line carries it
    /// only when a definition precedes it.
    pub continuation: Option<char>,

    /// Digits after the decimal point in scientific notation. `None` writes
    /// the shortest representation that reads back to the same `f64`.
    pub precision: Option<usize>,
}

impl WriteOptions {
    /// SPICE netlist layout: header, `definition`, and `+` continuation lines.
    pub fn spice(definition: impl Into<String>) -> Self {
        Self {
            header: Some("* s A".to_string()),
            definition: Some(definition.into()),
            footer: None,
            continuation: Some('+'),
            precision: Some(9),
        }
    }

    /// Number of lines written before the first sample.
    pub fn leading_lines(&self) -> usize {
        usize::from(self.header.is_some()) + usize::from(self.definition.is_some())
    }

    /// Number of lines written after the last sample.
    pub fn trailing_lines(&self) -> usize {
        self.footer.as_deref().map_or(0, |f| f.lines().count())
    }

    /// Reader settings that parse text written with these options.
    pub fn matching_read_options(&self) -> ReadOptions {
        ReadOptions {
            skip_start_lines: self.leading_lines(),
            ignore_end_lines: self.trailing_lines(),
            continuation: self.continuation,
            ..Default::default()
        }
    }
}
