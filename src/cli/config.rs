//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can keep settings in a config file:
//!
//! ```toml
//! # dropqc.toml
//! [filter]
//! fence_multiplier = 1.5
//! min_replicates = 2
//! parallel = true
//!
//! [input]
//! run_column = "plate"
//! sample_column = "well"
//! control_column = "orange"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for dropqc.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Filter settings.
    #[serde(default)]
    pub filter: FilterSection,

    /// Input table layout.
    #[serde(default)]
    pub input: InputSection,
}

/// Configuration for the filter command.
#[derive(Debug, Default, Deserialize)]
pub struct FilterSection {
    /// IQR multiplier for the Tukey fences.
    pub fence_multiplier: Option<f64>,

    /// Minimum surviving replicates for a sample to be kept.
    pub min_replicates: Option<usize>,

    /// Process runs concurrently (requires the parallel feature).
    pub parallel: Option<bool>,
}

/// Column names of the long-format input table.
#[derive(Debug, Default, Deserialize)]
pub struct InputSection {
    /// Column holding the run name.
    pub run_column: Option<String>,

    /// Column holding the sample name.
    pub sample_column: Option<String>,

    /// Column holding the control-dye intensity.
    pub control_column: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [filter]
            fence_multiplier = 3.0
            min_replicates = 3
            parallel = true

            [input]
            run_column = "plate"
            sample_column = "well"
            control_column = "control"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.filter.fence_multiplier, Some(3.0));
        assert_eq!(config.filter.min_replicates, Some(3));
        assert_eq!(config.filter.parallel, Some(true));
        assert_eq!(config.input.run_column.as_deref(), Some("plate"));
        assert_eq!(config.input.sample_column.as_deref(), Some("well"));
        assert_eq!(config.input.control_column.as_deref(), Some("control"));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [filter]
            min_replicates = 4
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.filter.min_replicates, Some(4));
        assert_eq!(config.filter.fence_multiplier, None);
        assert_eq!(config.input.control_column, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.filter.fence_multiplier, None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_str("[filter]\nmin_replicates = \"two\"").is_err());
    }
}
