//! Waveform summary formatting.

use crate::OutputFormat;
use anyhow::Result;
use lib_types::Waveform;
use std::io::Write;
use std::path::Path;

/// Headline numbers of one waveform.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub source: String,
    pub samples: usize,
    pub start_time: f64,
    pub stop_time: f64,
    pub duration: f64,
    pub min_amplitude: f64,
    pub max_amplitude: f64,
    pub peak_to_peak: f64,
}

impl Summary {
    pub fn of(source: &Path, waveform: &Waveform) -> Self {
        Self {
            source: source.display().to_string(),
            samples: waveform.len(),
            start_time: waveform.start_time(),
            stop_time: waveform.stop_time(),
            duration: waveform.duration(),
            min_amplitude: waveform.min_amplitude(),
            max_amplitude: waveform.max_amplitude(),
            peak_to_peak: waveform.peak_to_peak(),
        }
    }
}

/// Write a summary in the requested format.
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Waveform: {}", summary.source)?;
            writeln!(out, "  Samples:      {}", summary.samples)?;
            writeln!(out, "  Start time:   {:e} s", summary.start_time)?;
            writeln!(out, "  Stop time:    {:e} s", summary.stop_time)?;
            writeln!(out, "  Duration:     {:e} s", summary.duration)?;
            writeln!(out, "  Min:          {}", summary.min_amplitude)?;
            writeln!(out, "  Max:          {}", summary.max_amplitude)?;
            writeln!(out, "  Peak-to-peak: {}", summary.peak_to_peak)?;
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "source": summary.source,
                "samples": summary.samples,
                "start_time": summary.start_time,
                "stop_time": summary.stop_time,
                "duration": summary.duration,
                "min_amplitude": summary.min_amplitude,
                "max_amplitude": summary.max_amplitude,
                "peak_to_peak": summary.peak_to_peak,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "metric,value")?;
            writeln!(out, "source,{}", summary.source)?;
            writeln!(out, "samples,{}", summary.samples)?;
            writeln!(out, "start_time,{}", summary.start_time)?;
            writeln!(out, "stop_time,{}", summary.stop_time)?;
            writeln!(out, "duration,{}", summary.duration)?;
            writeln!(out, "min_amplitude,{}", summary.min_amplitude)?;
            writeln!(out, "max_amplitude,{}", summary.max_amplitude)?;
            writeln!(out, "peak_to_peak,{}", summary.peak_to_peak)?;
        }
    }

    Ok(())
}

/// Print a summary to stdout.
pub fn print_summary(summary: &Summary, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_summary(&mut lock, summary, format)
}
