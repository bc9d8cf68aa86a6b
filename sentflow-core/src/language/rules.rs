//! Runtime language rules built from a TOML configuration

use std::sync::Arc;

use super::abbreviation::{AbbreviationKind, AbbreviationTrie};
use super::config::LanguageConfig;
use crate::error::{CoreError, Result};
use crate::separator::{SeparatorClassifier, SeparatorTable};

/// Compiled, shareable rules for one language
#[derive(Debug, Clone)]
pub struct LanguageRules {
    code: String,
    name: String,
    aliases: Vec<String>,
    separators: Arc<SeparatorTable>,
    abbreviations: AbbreviationTrie,
    abbreviation_max_len: usize,
    short_token_length: usize,
}

impl LanguageRules {
    /// Compile rules from a parsed configuration
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        config
            .validate()
            .map_err(CoreError::InvalidLanguageConfig)?;

        let separators = SeparatorTable::new(
            &config.separators.strong,
            &config.separators.weak,
            &config.separators.ignorable,
        );

        Ok(Self {
            code: config.metadata.code.trim().to_lowercase(),
            name: config.metadata.name.clone(),
            aliases: config
                .metadata
                .aliases
                .iter()
                .map(|a| a.trim().to_lowercase())
                .collect(),
            separators: Arc::new(separators),
            abbreviations: AbbreviationTrie::from_categories(&config.abbreviations.categories),
            abbreviation_max_len: config.heuristics.abbreviation_max_len,
            short_token_length: config.heuristics.short_token_length,
        })
    }

    /// Parse and compile rules from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LanguageConfig =
            toml::from_str(text).map_err(|e| CoreError::InvalidLanguageConfig(e.to_string()))?;
        Self::from_config(&config)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Shared separator table
    pub fn separators(&self) -> Arc<SeparatorTable> {
        Arc::clone(&self.separators)
    }

    /// Classifier over this language's separators
    pub fn classifier(&self, line_breaks_strong: bool) -> SeparatorClassifier {
        SeparatorClassifier::new(self.separators()).with_line_breaks_strong(line_breaks_strong)
    }

    /// Known abbreviation ending right before a period
    pub fn abbreviation(&self, token: &str) -> Option<AbbreviationKind> {
        self.abbreviations.lookup(token)
    }

    pub fn abbreviation_count(&self) -> usize {
        self.abbreviations.len()
    }

    pub fn abbreviation_max_len(&self) -> usize {
        self.abbreviation_max_len
    }

    pub fn short_token_length(&self) -> usize {
        self.short_token_length
    }
}
