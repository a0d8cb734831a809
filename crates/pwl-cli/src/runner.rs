//! Read, operate, write.
//!
//! Each subcommand is one pass: load the input waveform(s) with the
//! configured reader settings, apply a single library operation, and write
//! the result with the configured layout.

use crate::config::ToolConfig;
use anyhow::{Context, Result};
use lib_dsp::DspResult;
use lib_pwl::{read_pwl, write_pwl};
use lib_types::Waveform;
use std::path::Path;

/// Executes operations under one configuration.
pub struct Runner {
    config: ToolConfig,
}

impl Runner {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Read a waveform with the configured reader settings.
    pub fn read(&self, path: &Path) -> Result<Waveform> {
        let waveform = read_pwl(path, &self.config.read)
            .with_context(|| format!("Failed to read waveform from {:?}", path))?;
        tracing::info!("Read {} samples from {:?}", waveform.len(), path);
        Ok(waveform)
    }

    /// Write a waveform with the configured layout.
    pub fn write(&self, waveform: &Waveform, path: &Path) -> Result<()> {
        write_pwl(path, waveform, &self.config.write)
            .with_context(|| format!("Failed to write waveform to {:?}", path))?;
        tracing::info!("Wrote {} samples to {:?}", waveform.len(), path);
        Ok(())
    }

    /// Apply a single-input operation from `input` to `output`.
    pub fn transform<F>(&self, input: &Path, output: &Path, op: F) -> Result<Waveform>
    where
        F: FnOnce(&Waveform) -> DspResult<Waveform>,
    {
        let waveform = self.read(input)?;
        let result = op(&waveform).with_context(|| format!("Operation on {:?} failed", input))?;
        self.write(&result, output)?;
        Ok(result)
    }

    /// Apply a two-input operation from `first` and `second` to `output`.
    pub fn combine<F>(&self, first: &Path, second: &Path, output: &Path, op: F) -> Result<Waveform>
    where
        F: FnOnce(&Waveform, &Waveform) -> DspResult<Waveform>,
    {
        let a = self.read(first)?;
        let b = self.read(second)?;
        let result = op(&a, &b)
            .with_context(|| format!("Operation on {:?} and {:?} failed", first, second))?;
        self.write(&result, output)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_pwl::WriteOptions;
    use std::fs;

    fn setup(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pwl");
        fs::write(&input, content).unwrap();
        (dir, input)
    }

    #[test]
    fn test_transform_scale() {
        let (dir, input) = setup("0 0\n1 1\n2 0\n");
        let output = dir.path().join("out.pwl");

        let runner = Runner::new(ToolConfig::default());
        let result = runner
            .transform(&input, &output, |w| lib_dsp::scale_amplitude(w, 2.0))
            .unwrap();

        assert_eq!(result.amplitudes(), &[0.0, 2.0, 0.0]);
        assert_eq!(runner.read(&output).unwrap(), result);
    }

    #[test]
    fn test_combine_catenate() {
        let (dir, input) = setup("0 0\n1 1\n");
        let output = dir.path().join("out.pwl");

        let runner = Runner::new(ToolConfig::default());
        let result = runner
            .combine(&input, &input, &output, lib_dsp::catenate)
            .unwrap();
        assert_eq!(result.times(), &[0.0, 1.0, 2.0]);
        assert_eq!(result.amplitudes(), &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_skip_overrides_and_spice_output() {
        let (dir, input) = setup("* header\n0 0\n1 5\n.end\n");
        let output = dir.path().join("out.pwl");

        let mut config = ToolConfig::default().with_overrides(Some(1), Some(1));
        config.write = WriteOptions::spice("V1 in 0 PWL");
        let runner = Runner::new(config);
        let result = runner.transform(&input, &output, |w| Ok(w.clone())).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("* s A\nV1 in 0 PWL\n+ "));

        let back = lib_pwl::read_pwl(&output, &runner.config().write.matching_read_options()).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_read_error_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Runner::new(ToolConfig::default());

        let err = runner.read(&dir.path().join("absent.pwl")).unwrap_err();
        assert!(err.to_string().contains("Failed to read waveform"));
        assert!(err
            .downcast_ref::<lib_pwl::CodecError>()
            .map_or(false, |e| matches!(e, lib_pwl::CodecError::NotFound { .. })));
    }

    #[test]
    fn test_operation_error_leaves_no_output() {
        let (dir, input) = setup("0 0\n1 1\n");
        let output = dir.path().join("out.pwl");

        let runner = Runner::new(ToolConfig::default());
        assert!(runner
            .transform(&input, &output, |w| lib_dsp::repeat_times(w, -1))
            .is_err());
        assert!(!output.exists());
    }
}
