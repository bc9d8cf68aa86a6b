//! Configuration structures and validation
//!
//! This module defines the TOML schema for language configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root language configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: Metadata,
    pub separators: Separators,
    #[serde(default)]
    pub heuristics: Heuristics,
    #[serde(default)]
    pub abbreviations: Abbreviations,
}

/// Language metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Separator symbol sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Separators {
    pub strong: Vec<char>,
    #[serde(default)]
    pub weak: Vec<char>,
    #[serde(default)]
    pub ignorable: Vec<char>,
}

/// Language-dependent thresholds used by the boundary heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heuristics {
    /// Alphabetic tokens up to this many letters before a period are
    /// treated as possible abbreviations
    #[serde(default = "default_abbreviation_max_len")]
    pub abbreviation_max_len: usize,
    /// Weak separators after tokens of at most this many characters are ignored
    #[serde(default = "default_short_token_length")]
    pub short_token_length: usize,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            abbreviation_max_len: default_abbreviation_max_len(),
            short_token_length: default_short_token_length(),
        }
    }
}

/// Abbreviation configuration
///
/// The `titles` category precedes names and suppresses a boundary whatever
/// follows; every other category only does so before a lowercase word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Abbreviations {
    #[serde(flatten)]
    pub categories: HashMap<String, Vec<String>>,
}

fn default_abbreviation_max_len() -> usize {
    2
}

fn default_short_token_length() -> usize {
    3
}

impl LanguageConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.metadata.code.trim().is_empty() {
            return Err("Language code must not be empty".to_string());
        }

        if self.separators.strong.is_empty() {
            return Err("No strong separator characters defined".to_string());
        }

        for &ch in &self.separators.strong {
            if ch.is_alphanumeric() {
                return Err(format!("Strong separator '{ch}' is alphanumeric"));
            }
        }

        for &ch in &self.separators.weak {
            if self.separators.strong.contains(&ch) {
                return Err(format!("'{ch}' is listed as both strong and weak"));
            }
        }

        Ok(())
    }
}
