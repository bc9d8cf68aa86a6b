//! List command implementation

use anyhow::Result;
use clap::Subcommand;
use sentflow_core::language::supported_languages;
use sentflow_engine::TokenizerKind;
use std::io::{self, Write};

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List embedded languages
    Languages,

    /// List tokenizer backends
    Tokenizers,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Print the list to stdout
    pub fn execute(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Write the list to `out`
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        match self {
            ListCommands::Languages => {
                for rules in supported_languages() {
                    writeln!(
                        out,
                        "{:<4} {:<10} aliases: {:<20} abbreviations: {}",
                        rules.code(),
                        rules.name(),
                        rules.aliases().join(", "),
                        rules.abbreviation_count()
                    )?;
                }
            }
            ListCommands::Tokenizers => {
                for kind in TokenizerKind::ALL {
                    writeln!(out, "{:<11} {}", kind.as_str(), describe(kind))?;
                }
            }
            ListCommands::Formats => {
                writeln!(out, "text        one sentence per line")?;
                writeln!(out, "json        one JSON object per sentence (JSON Lines)")?;
            }
        }
        Ok(())
    }
}

fn describe(kind: TokenizerKind) -> &'static str {
    match kind {
        TokenizerKind::Neural => "statistical boundary model (default)",
        TokenizerKind::RuleBased => "punctuation and capitalization rules",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(command: ListCommands) -> String {
        let mut out = Vec::new();
        command.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_languages() {
        let text = listing(ListCommands::Languages);
        assert!(text.lines().any(|l| l.starts_with("en ")));
        assert!(text.lines().any(|l| l.starts_with("ru ") && l.contains("Russian")));
    }

    #[test]
    fn test_list_tokenizers() {
        let text = listing(ListCommands::Tokenizers);
        assert!(text.contains("neural"));
        assert!(text.contains("rule-based"));
        assert_eq!(text.lines().count(), TokenizerKind::ALL.len());
    }

    #[test]
    fn test_list_formats() {
        let text = listing(ListCommands::Formats);
        assert!(text.starts_with("text"));
        assert!(text.contains("json"));
    }
}
