//! Language configuration loader
//!
//! Manages embedded language rules with caching, plus loading of
//! external TOML files.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use super::rules::LanguageRules;
use crate::error::{CoreError, Result};

/// Embedded language configurations, keyed by code and aliases
static EMBEDDED: OnceLock<HashMap<String, Arc<LanguageRules>>> = OnceLock::new();

const EMBEDDED_SOURCES: &[(&str, &str)] = &[
    ("ru", include_str!("../../configs/languages/russian.toml")),
    ("en", include_str!("../../configs/languages/english.toml")),
];

fn embedded() -> &'static HashMap<String, Arc<LanguageRules>> {
    EMBEDDED.get_or_init(|| {
        let mut map = HashMap::new();

        for (code, source) in EMBEDDED_SOURCES {
            match LanguageRules::from_toml_str(source) {
                Ok(rules) => {
                    let rules = Arc::new(rules);
                    for alias in rules.aliases() {
                        map.insert(alias.clone(), Arc::clone(&rules));
                    }
                    map.insert(rules.code().to_string(), rules);
                }
                Err(e) => {
                    log::warn!("Failed to load embedded {code} config: {e}");
                }
            }
        }

        map
    })
}

/// Load embedded language rules by code or alias
pub fn get_rules(code: &str) -> Result<Arc<LanguageRules>> {
    let key = code.trim().to_lowercase();
    embedded()
        .get(&key)
        .cloned()
        .ok_or_else(|| CoreError::UnsupportedLanguage {
            code: code.to_string(),
        })
}

/// Embedded languages, one entry per code, sorted by code
pub fn supported_languages() -> Vec<Arc<LanguageRules>> {
    let mut seen: Vec<Arc<LanguageRules>> = Vec::new();
    for rules in embedded().values() {
        if !seen.iter().any(|r| r.code() == rules.code()) {
            seen.push(Arc::clone(rules));
        }
    }
    seen.sort_by(|a, b| a.code().cmp(b.code()));
    seen
}

/// Load language rules from an external TOML file
pub fn load_from_file(path: impl AsRef<Path>) -> Result<LanguageRules> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::LanguageConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loading language configuration from {}", path.display());
    LanguageRules::from_toml_str(&text)
}
