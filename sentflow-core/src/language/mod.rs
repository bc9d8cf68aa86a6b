//! Language data for sentence boundary detection
//!
//! Separator sets, abbreviations and heuristic thresholds are kept in TOML
//! files. Russian and English are embedded; other languages can be loaded
//! from disk.

pub(crate) mod abbreviation;
pub(crate) mod config;
pub(crate) mod loader;
pub(crate) mod rules;

pub use abbreviation::AbbreviationKind;
pub use config::LanguageConfig;
pub use loader::{get_rules, load_from_file, supported_languages};
pub use rules::LanguageRules;
