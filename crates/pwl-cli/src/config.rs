//! Tool configuration loading and validation.

use anyhow::{Context, Result};
use lib_dsp::Extrapolation;
use lib_pwl::{ReadOptions, WriteOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level tool configuration.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// How input PWL files are parsed.
    pub read: ReadOptions,

    /// How output PWL files are laid out.
    pub write: WriteOptions,

    /// Values used outside a waveform's span when resampling or adding.
    pub extrapolation: Extrapolation,
}

impl ToolConfig {
    /// Apply command-line skip counts on top of the file settings.
    pub fn with_overrides(
        mut self,
        skip_start_lines: Option<usize>,
        ignore_end_lines: Option<usize>,
    ) -> Self {
        if let Some(n) = skip_start_lines {
            self.read.skip_start_lines = n;
        }
        if let Some(n) = ignore_end_lines {
            self.read.ignore_end_lines = n;
        }
        self
    }
}

/// Load configuration from a file.
pub fn load_config(path: &Path) -> Result<ToolConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: ToolConfig = if path.extension().map_or(false, |e| e == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config as JSON: {:?}", path))?
    } else {
        // Assume TOML
        toml::from_str(&content).with_context(|| "Failed to parse config as TOML")?
    };

    validate_config(&config)?;

    tracing::debug!("Loaded configuration from {:?}: {:?}", path, config);
    Ok(config)
}

/// Validate configuration.
pub fn validate_config(config: &ToolConfig) -> Result<()> {
    let read = &config.read;

    if !read.time_scale.is_finite() || read.time_scale <= 0.0 {
        anyhow::bail!(
            "read.time_scale must be a positive finite number, got {}",
            read.time_scale
        );
    }
    if !read.amplitude_scale.is_finite() {
        anyhow::bail!(
            "read.amplitude_scale must be finite, got {}",
            read.amplitude_scale
        );
    }

    // A continuation symbol that can start a number would swallow data.
    for (label, symbol) in [
        ("read.continuation", read.continuation),
        ("write.continuation", config.write.continuation),
    ] {
        if let Some(c) = symbol {
            if c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '.' | ',') {
                anyhow::bail!("{} cannot be {:?}", label, c);
            }
        }
    }

    for (label, line) in [
        ("write.header", &config.write.header),
        ("write.definition", &config.write.definition),
    ] {
        if line.as_deref().map_or(false, |l| l.contains('\n')) {
            anyhow::bail!("{} must be a single line", label);
        }
    }

    let ex = &config.extrapolation;
    if !ex.left.is_finite() || !ex.right.is_finite() {
        anyhow::bail!(
            "extrapolation values must be finite (got left={}, right={})",
            ex.left,
            ex.right
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_toml_partial() {
        let file = write_temp(
            ".toml",
            r#"
[read]
skip_start_lines = 2
time_scale = 1e-9

[write]
definition = "V1 in 0 PWL"
continuation = "+"

[extrapolation]
right = 1.0
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.read.skip_start_lines, 2);
        assert_eq!(config.read.ignore_end_lines, 0);
        assert_eq!(config.read.time_scale, 1e-9);
        assert_eq!(config.read.continuation, Some('+'));
        assert_eq!(config.write.definition.as_deref(), Some("V1 in 0 PWL"));
        assert_eq!(config.write.continuation, Some('+'));
        assert_eq!(config.extrapolation.left, 0.0);
        assert_eq!(config.extrapolation.right, 1.0);
    }

    #[test]
    fn test_load_json() {
        let file = write_temp(".json", r#"{"read": {"ignore_end_lines": 1}}"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.read.ignore_end_lines, 1);
        assert_eq!(config.write, WriteOptions::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = write_temp(".toml", "");
        assert_eq!(load_config(file.path()).unwrap(), ToolConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = ToolConfig::default();
        config.read.time_scale = 0.0;
        assert!(validate_config(&config).is_err());

        let mut config = ToolConfig::default();
        config.read.continuation = Some('-');
        assert!(validate_config(&config).is_err());

        let mut config = ToolConfig::default();
        config.write.header = Some("a\nb".to_string());
        assert!(validate_config(&config).is_err());

        let mut config = ToolConfig::default();
        config.extrapolation.left = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = ToolConfig::default().with_overrides(Some(3), None);
        assert_eq!(config.read.skip_start_lines, 3);
        assert_eq!(config.read.ignore_end_lines, 0);
    }
}
