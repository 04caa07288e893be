//! Configuration handling for SeqLab CLI
//!
//! Supports loading configuration from seqlab.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use seqlab_core::ScoringScheme;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "seqlab.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub patterns: PatternConfig,
    #[serde(default)]
    pub fasta: FastaConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default number of threads to use
    #[serde(default = "default_threads")]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Reward for a matching pair
    #[serde(default = "default_match_score")]
    pub match_score: i32,

    /// Score for a mismatching pair
    #[serde(default = "default_mismatch")]
    pub mismatch: i32,

    /// Linear gap penalty
    #[serde(default = "default_gap")]
    pub gap: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Window length for repeat counting
    #[serde(default = "default_repeat_length")]
    pub repeat_length: usize,

    /// Shortest palindrome reported
    #[serde(default = "default_min_palindrome_length")]
    pub min_palindrome_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastaConfig {
    /// Sequence characters per output line (0 disables wrapping)
    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// zstd level used when writing .seqdb files
    #[serde(default = "default_compression_level")]
    pub compression_level: i32,
}

// Default value functions
fn default_threads() -> usize { num_cpus::get() }
fn default_match_score() -> i32 { 1 }
fn default_mismatch() -> i32 { -1 }
fn default_gap() -> i32 { -2 }
fn default_repeat_length() -> usize { 4 }
fn default_min_palindrome_length() -> usize { 4 }
fn default_line_width() -> usize { seqlab_core::io::DEFAULT_LINE_WIDTH }
fn default_compression_level() -> i32 { seqlab_core::store::DEFAULT_COMPRESSION_LEVEL }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { threads: default_threads() }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: default_match_score(),
            mismatch: default_mismatch(),
            gap: default_gap(),
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            repeat_length: default_repeat_length(),
            min_palindrome_length: default_min_palindrome_length(),
        }
    }
}

impl Default for FastaConfig {
    fn default() -> Self {
        Self { line_width: default_line_width() }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { compression_level: default_compression_level() }
    }
}

impl ScoringConfig {
    /// Scoring scheme with optional per-field overrides from the command line
    pub fn scheme(&self, match_score: Option<i32>, mismatch: Option<i32>, gap: Option<i32>) -> ScoringScheme {
        ScoringScheme::new(
            match_score.unwrap_or(self.match_score),
            mismatch.unwrap_or(self.mismatch),
            gap.unwrap_or(self.gap),
        )
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            CliError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scoring.match_score, 1);
        assert_eq!(config.scoring.gap, -2);
        assert_eq!(config.patterns.repeat_length, 4);
        assert_eq!(config.fasta.line_width, 60);
        assert!(config.general.threads >= 1);
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.scoring.mismatch = -3;
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded_config = Config::load_from_file(temp_file.path())?;

        assert_eq!(loaded_config.scoring.mismatch, -3);
        assert_eq!(config.patterns.min_palindrome_length, loaded_config.patterns.min_palindrome_length);
        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let config: Config = toml::from_str("[scoring]\ngap = -5\n")?;
        assert_eq!(config.scoring.gap, -5);
        assert_eq!(config.scoring.match_score, 1);
        assert_eq!(config.patterns.repeat_length, 4);
        Ok(())
    }

    #[test]
    fn test_bad_config_reports_config_error() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(temp_file.path(), "[scoring]\ngap = \"wide\"\n")?;

        let err = Config::load(Some(temp_file.path())).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
        assert!(crate::error::format_error_with_suggestions(&err).contains("seqlab.toml"));

        let missing = Config::load_from_file(Path::new("/nonexistent/seqlab.toml")).unwrap_err();
        assert!(matches!(missing, CliError::Config { .. }));
        Ok(())
    }

    #[test]
    fn test_scheme_overrides() {
        let scoring = ScoringConfig::default();
        let scheme = scoring.scheme(Some(2), None, Some(-4));
        assert_eq!(scheme, ScoringScheme::new(2, -1, -4));
    }

    #[test]
    fn test_example_toml_generation() -> Result<()> {
        let example = Config::example_toml()?;
        assert!(example.contains("[general]"));
        assert!(example.contains("[scoring]"));
        assert!(example.contains("[patterns]"));
        Ok(())
    }
}
