//! PWL toolkit CLI: inspect and transform piecewise-linear waveform files.
//!
//! This is the main entry point for the `pwl` tool.

mod config;
mod output;
mod runner;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::ToolConfig;
use lib_dsp::{ExtendOptions, WindowOptions};
use lib_pwl::WriteOptions;
use runner::Runner;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pwl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Summary output format
    #[arg(short, long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Path to a TOML or JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Leading lines to skip in input files (overrides config)
    #[arg(long, global = true)]
    skip_start_lines: Option<usize>,

    /// Trailing lines to ignore in input files (overrides config)
    #[arg(long, global = true)]
    ignore_end_lines: Option<usize>,

    /// Write SPICE layout with this PWL source definition line
    #[arg(long, global = true)]
    spice: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of a PWL file
    Info {
        /// Input PWL file
        input: PathBuf,
    },

    /// Multiply every amplitude by a factor
    Scale {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Amplitude multiplier
        #[arg(short = 'k', long, allow_negative_numbers = true)]
        factor: f64,
    },

    /// Stretch the time axis to a new duration starting at a delay
    Shift {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// New duration in seconds
        #[arg(short, long)]
        duration: f64,

        /// Start time of the result in seconds
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        delay: f64,
    },

    /// Keep the samples inside a time range
    Cut {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        start: f64,

        #[arg(long, allow_negative_numbers = true)]
        end: f64,
    },

    /// Append copies of a waveform to itself
    Repeat {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Number of extra copies
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        times: i64,

        /// Seconds between copies
        #[arg(long, default_value = "0")]
        gap: f64,
    },

    /// Repeat a waveform until it reaches a stop time
    RepeatUntil {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        stop_time: f64,
    },

    /// Append one waveform after another
    Catenate {
        first: PathBuf,

        second: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Seconds between the two waveforms
        #[arg(long, default_value = "0")]
        gap: f64,
    },

    /// Extend a waveform by repetition to a target duration
    Extend {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Target duration in seconds
        #[arg(short, long)]
        duration: f64,

        /// Start of the repeated window
        #[arg(long, allow_negative_numbers = true)]
        clip_start: Option<f64>,

        /// End of the repeated window
        #[arg(long, allow_negative_numbers = true)]
        clip_end: Option<f64>,

        /// Drop the samples before the window instead of playing them once
        #[arg(long)]
        no_head: bool,
    },

    /// Place a waveform inside the window [0, stop time]
    Fit {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        stop_time: f64,

        #[arg(long, default_value = "0")]
        delay: f64,

        /// Amplitude before the delay
        #[arg(long, allow_negative_numbers = true)]
        before: Option<f64>,

        /// Amplitude after the waveform ends
        #[arg(long, allow_negative_numbers = true)]
        after: Option<f64>,
    },

    /// Resample onto a uniform time grid
    Resample {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Grid step in seconds
        #[arg(long)]
        step: f64,
    },

    /// Add the second waveform to the first on the first's time grid
    Add {
        first: PathBuf,

        second: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {:?}", path);
            config::load_config(path)?
        }
        None => ToolConfig::default(),
    }
    .with_overrides(cli.skip_start_lines, cli.ignore_end_lines);

    if let Some(definition) = cli.spice {
        config.write = WriteOptions::spice(definition);
    }
    config::validate_config(&config)?;

    let runner = Runner::new(config);
    let extrapolation = runner.config().extrapolation;

    let (source, result) = match cli.command {
        Commands::Info { input } => {
            let waveform = runner.read(&input)?;
            (input, waveform)
        }
        Commands::Scale { input, output, factor } => {
            let wf = runner.transform(&input, &output, |w| lib_dsp::scale_amplitude(w, factor))?;
            (output, wf)
        }
        Commands::Shift { input, output, duration, delay } => {
            let wf = runner.transform(&input, &output, |w| lib_dsp::shift_time(w, duration, delay))?;
            (output, wf)
        }
        Commands::Cut { input, output, start, end } => {
            let wf = runner.transform(&input, &output, |w| {
                let cut = lib_dsp::cut(w, start, end)?;
                tracing::info!(
                    "Kept source samples {}..={}",
                    cut.start_index,
                    cut.end_index
                );
                Ok(cut.waveform)
            })?;
            (output, wf)
        }
        Commands::Repeat { input, output, times, gap } => {
            let wf = runner.transform(&input, &output, |w| lib_dsp::repeat_with_gap(w, times, gap))?;
            (output, wf)
        }
        Commands::RepeatUntil { input, output, stop_time } => {
            let wf = runner.transform(&input, &output, |w| {
                lib_dsp::repeat_till_stoptime(w, stop_time)
            })?;
            (output, wf)
        }
        Commands::Catenate { first, second, output, gap } => {
            let wf = runner.combine(&first, &second, &output, |a, b| {
                lib_dsp::catenate_with_gap(a, b, gap)
            })?;
            (output, wf)
        }
        Commands::Extend { input, output, duration, clip_start, clip_end, no_head } => {
            let windowed = clip_start.is_some() || clip_end.is_some() || no_head;
            let options = ExtendOptions {
                clip_start,
                clip_end,
                keep_head: !no_head,
            };
            let wf = runner.transform(&input, &output, |w| {
                if windowed {
                    lib_dsp::extend_window_by_repeating(w, duration, &options)
                } else {
                    lib_dsp::extend_by_repeating(w, duration)
                }
            })?;
            (output, wf)
        }
        Commands::Fit { input, output, stop_time, delay, before, after } => {
            let options = WindowOptions {
                delay,
                before_value: before,
                after_value: after,
            };
            let wf = runner.transform(&input, &output, |w| {
                lib_dsp::fit_to_window(w, stop_time, &options)
            })?;
            (output, wf)
        }
        Commands::Resample { input, output, step } => {
            let wf = runner.transform(&input, &output, |w| {
                lib_dsp::resample_uniform(w, step, &extrapolation)
            })?;
            (output, wf)
        }
        Commands::Add { first, second, output } => {
            let wf = runner.combine(&first, &second, &output, |a, b| {
                lib_dsp::add_with(a, b, &extrapolation)
            })?;
            (output, wf)
        }
    };

    output::print_summary(&output::Summary::of(&source, &result), cli.format)?;

    Ok(())
}
