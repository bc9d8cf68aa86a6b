//! Configuration file support
//!
//! A `sentflow.toml` file holds an `[engine]` table (every engine option,
//! all optional), an `[input]` table and a `[tokenizer]` table. Command
//! line flags override the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sentflow_engine::EngineConfig;

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Engine options
    pub engine: EngineConfig,

    /// Input reading options
    pub input: InputConfig,

    /// Backend resources
    pub tokenizer: TokenizerConfig,
}

/// Input-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Bytes read per chunk, simulating token-sized deliveries
    pub chunk_bytes: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { chunk_bytes: 64 }
    }
}

/// Tokenizer resources
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Directory of cached boundary models (`<code>.json`)
    pub model_dir: Option<PathBuf>,

    /// External language configuration file
    pub language_config: Option<PathBuf>,
}

impl CliConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&text)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a file can get wrong
    pub fn validate(&self) -> Result<()> {
        if self.input.chunk_bytes == 0 {
            return Err(CliError::ConfigError("input.chunk_bytes must be positive".to_string()).into());
        }
        self.engine
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentflow_engine::TokenizerKind;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let config = CliConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[engine]"));
        assert!(text.contains("context_size = 15"));
        assert!(text.contains("tokenizer = \"neural\""));

        let parsed: CliConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sentflow.toml");
        fs::write(
            &path,
            "[engine]\ntokenizer = \"rule-based\"\npoetic_mode = true\n\n[input]\nchunk_bytes = 8\n",
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.engine.tokenizer, TokenizerKind::RuleBased);
        assert!(config.engine.poetic_mode);
        assert_eq!(config.engine.context_size, 15);
        assert_eq!(config.input.chunk_bytes, 8);
        assert!(config.tokenizer.model_dir.is_none());
    }

    #[test]
    fn test_invalid_files_rejected() {
        let dir = TempDir::new().unwrap();

        let path = dir.path().join("unknown.toml");
        fs::write(&path, "[engine]\nbogus = 1\n").unwrap();
        let err = CliConfig::load(&path).unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());

        let path = dir.path().join("zero.toml");
        fs::write(&path, "[input]\nchunk_bytes = 0\n").unwrap();
        assert!(CliConfig::load(&path).is_err());

        let path = dir.path().join("engine.toml");
        fs::write(&path, "[engine]\ntokenization_interval = 0\n").unwrap();
        assert!(CliConfig::load(&path).is_err());

        assert!(CliConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
