//! PWL text writer.

use crate::error::{CodecError, CodecResult};
use crate::options::WriteOptions;
use lib_types::Waveform;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a waveform to a PWL file, creating or overwriting it.
///
/// # Errors
///
/// [`CodecError::Io`] if the destination cannot be created or written
/// (missing parent directory, permissions).
pub fn write_pwl(
    path: impl AsRef<Path>,
    waveform: &Waveform,
    options: &WriteOptions,
) -> CodecResult<()> {
    let path = path.as_ref();
    let io_err = |source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(format_pwl(waveform, options).as_bytes())
        .map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    tracing::debug!("Wrote {} samples to {:?}", waveform.len(), path);
    Ok(())
}

/// Serialize a waveform to PWL text.
pub fn format_pwl(waveform: &Waveform, options: &WriteOptions) -> String {
    // Roughly two 24-character values per line.
    let mut out = String::with_capacity(waveform.len() * 50);

    if let Some(header) = &options.header {
        out.push_str(header);
        out.push('\n');
    }
    if let Some(definition) = &options.definition {
        out.push_str(definition);
        out.push('\n');
    }

    for (index, (time, amplitude)) in waveform.samples().enumerate() {
        if let Some(symbol) = options.continuation {
            if index > 0 || options.definition.is_some() {
                out.push(symbol);
                out.push(' ');
            }
        }
        out.push_str(&format_value(time, options.precision));
        out.push(' ');
        out.push_str(&format_value(amplitude, options.precision));
        out.push('\n');
    }

    if let Some(footer) = &options.footer {
        out.push_str(footer);
        if !footer.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

fn format_value(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{:.*e}", digits, value),
        // Shortest representation that parses back to the same f64.
        None => format!("{:e}", value),
    }
}
