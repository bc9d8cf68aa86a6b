//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::CliConfig;

const HEADER: &str = "\
# sentflow configuration
#
# Every key is optional; missing keys take the values shown here.
# Command line flags of `sentflow process` override this file.
# Optional keys not shown: engine.force_first_fragment_after_words,
# tokenizer.model_dir, tokenizer.language_config.

";

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let template = render_template()?;

        match &self.output {
            Some(path) => {
                fs::write(path, template)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                println!("✓ Configuration written to {}", path.display());
                println!("  Use it with: sentflow process -c {} -i <FILE>", path.display());
            }
            None => print!("{template}"),
        }
        Ok(())
    }
}

/// Default configuration as a commented TOML document
pub fn render_template() -> Result<String> {
    Ok(format!("{HEADER}{}", CliConfig::default().to_toml_string()?))
}
