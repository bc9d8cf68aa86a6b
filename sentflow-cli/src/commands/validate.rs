//! Validate command implementation

use anyhow::Result;
use clap::{ArgGroup, Args};
use sentflow_core::language::load_from_file;
use std::path::PathBuf;

use crate::config::CliConfig;

/// Arguments for the validate command
#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .multiple(true)
        .args(["language_config", "config"])
))]
pub struct ValidateArgs {
    /// Language configuration file
    #[arg(short = 'L', long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// sentflow configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        if let Some(path) = &self.language_config {
            println!("Validating language configuration: {}", path.display());
            match load_from_file(path) {
                Ok(rules) => {
                    println!("✓ Configuration is valid!");
                    println!("  Language code: {}", rules.code());
                    println!("  Language name: {}", rules.name());
                    println!("  Abbreviations: {}", rules.abbreviation_count());
                }
                Err(e) => {
                    println!("✗ Configuration is invalid!");
                    println!("  Error: {e}");
                    anyhow::bail!("Validation failed: {e}");
                }
            }
        }

        if let Some(path) = &self.config {
            println!("Validating configuration: {}", path.display());
            match CliConfig::load(path) {
                Ok(config) => {
                    println!("✓ Configuration is valid!");
                    println!(
                        "  Tokenizer: {} ({})",
                        config.engine.tokenizer, config.engine.language
                    );
                }
                Err(e) => {
                    println!("✗ Configuration is invalid!");
                    println!("  Error: {e:#}");
                    return Err(e.context("Validation failed"));
                }
            }
        }

        Ok(())
    }
}
