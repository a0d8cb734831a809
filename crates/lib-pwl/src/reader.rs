//! PWL text parser.
//!
//! Supports:
//! - one `<time> <amplitude>` sample per line, separated by whitespace or a comma
//! - scientific notation (`6.4e-07`)
//! - a SPICE continuation prefix (`+ 1e-9 0.5`)
//! - optional engineering suffixes (`10ns`, `3.3mV`)
//!
//! Header and footer lines are dropped by count. The parser never guesses
//! which lines are data: every retained line, blank ones included, must hold
//! one sample.

use crate::error::{CodecError, CodecResult};
use crate::options::ReadOptions;
use lib_types::Waveform;
use nom::{
    branch::alt,
    character::complete::{alpha0, char, space0, space1},
    combinator::{eof, map, opt, value},
    number::complete::double,
    IResult, Parser,
};
use std::path::Path;

/// Read a PWL file.
///
/// # Errors
///
/// - [`CodecError::NotFound`] if `path` does not exist
/// - [`CodecError::Io`] for other read failures
/// - [`CodecError::Syntax`] / [`CodecError::InvalidFormat`] for bad content
pub fn read_pwl(path: impl AsRef<Path>, options: &ReadOptions) -> CodecResult<Waveform> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| CodecError::io(path, e))?;

    let waveform = parse_pwl(&content, options)?;
    tracing::debug!(
        "Read {} samples from {:?} ({} to {} s)",
        waveform.len(),
        path,
        waveform.start_time(),
        waveform.stop_time()
    );
    Ok(waveform)
}

/// Parse PWL text held in memory.
pub fn parse_pwl(content: &str, options: &ReadOptions) -> CodecResult<Waveform> {
    let lines: Vec<&str> = content.lines().collect();
    let total = lines.len();
    let skip = options.skip_start_lines;
    let ignore = options.ignore_end_lines;

    if skip + ignore > total {
        return Err(CodecError::invalid_format(
            total,
            format!(
                "cannot drop {} leading and {} trailing lines from {} lines",
                skip, ignore, total
            ),
        ));
    }

    let body = &lines[skip..total - ignore];
    let mut times = Vec::with_capacity(body.len());
    let mut amplitudes = Vec::with_capacity(body.len());

    for (offset, raw) in body.iter().enumerate() {
        let line_no = skip + offset + 1;
        if raw.trim().is_empty() {
            return Err(CodecError::syntax(
                line_no,
                1,
                "blank line; expected `<time> <amplitude>`",
            ));
        }

        let (_, (time, amplitude)) =
            sample_line(raw, options).map_err(|e| syntax_error(line_no, raw, e))?;
        let time = time * options.time_scale;
        let amplitude = amplitude * options.amplitude_scale;

        if !time.is_finite() || !amplitude.is_finite() {
            return Err(CodecError::syntax(
                line_no,
                1,
                format!("non-finite sample ({}, {})", time, amplitude),
            ));
        }
        if let Some(&previous) = times.last() {
            if time <= previous {
                return Err(CodecError::invalid_format(
                    line_no,
                    format!(
                        "time {} is not strictly greater than previous time {}",
                        time, previous
                    ),
                ));
            }
        }

        times.push(time);
        amplitudes.push(amplitude);
    }

    if times.is_empty() {
        return Err(CodecError::invalid_format(
            total - ignore,
            "no samples after dropping header and footer lines",
        ));
    }

    Waveform::new(times, amplitudes)
        .map_err(|e| CodecError::invalid_format(total - ignore, e.to_string()))
}

fn syntax_error(line: usize, raw: &str, err: nom::Err<nom::error::Error<&str>>) -> CodecError {
    match err {
        nom::Err::Incomplete(_) => CodecError::syntax(line, raw.len() + 1, "incomplete sample"),
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let column = raw.len() - e.input.len() + 1;
            let preview: String = e.input.chars().take(20).collect();
            CodecError::syntax(
                line,
                column,
                format!("expected `<time> <amplitude>`, found '{}'", preview),
            )
        }
    }
}

// ============================================================================
// Nom Parsers (nom 8 compatible)
// ============================================================================

fn sample_line<'a>(input: &'a str, options: &ReadOptions) -> IResult<&'a str, (f64, f64)> {
    let (input, _) = space0(input)?;
    let (input, _) = match options.continuation {
        Some(symbol) => opt(char(symbol)).parse(input)?,
        None => (input, None),
    };
    let (input, _) = space0(input)?;
    let (input, time) = number(input, options.scale_suffixes)?;
    let (input, _) = separator(input)?;
    let (input, amplitude) = number(input, options.scale_suffixes)?;
    let (input, _) = space0(input)?;
    let (input, _) = eof(input)?;

    Ok((input, (time, amplitude)))
}

fn separator(input: &str) -> IResult<&str, ()> {
    alt((
        map((space0, char(','), space0), |_| ()),
        map(space1, |_| ()),
    ))
    .parse(input)
}

fn number(input: &str, scale_suffixes: bool) -> IResult<&str, f64> {
    let (input, magnitude) = double(input)?;
    if !scale_suffixes {
        return Ok((input, magnitude));
    }

    let (input, scale) = opt(scale_suffix).parse(input)?;
    // Unit letters after the scale (`s`, `V`, `A`) carry no value.
    let (input, _) = alpha0(input)?;
    Ok((input, magnitude * scale.unwrap_or(1.0)))
}

fn scale_suffix(input: &str) -> IResult<&str, f64> {
    alt((
        value(1e-12, char('p')),
        value(1e-9, char('n')),
        value(1e-6, char('u')),
        value(1e-3, char('m')),
        value(1e-2, char('c')),
        value(1e-1, char('d')),
        value(1e3, char('k')),
        value(1e6, char('M')),
        value(1e9, char('G')),
    ))
    .parse(input)
}
