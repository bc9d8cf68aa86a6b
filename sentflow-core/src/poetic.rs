//! Poetic mode
//!
//! Line feeds become strong separators so that every verse line is a
//! sentence of its own. The line feed can be kept in the emitted text for
//! consumers that pause on it.

use std::sync::Arc;

use crate::language::LanguageRules;
use crate::separator::SeparatorClassifier;

/// Poetic mode switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoeticMode {
    pub enabled: bool,
    /// Keep the trailing line feed of a verse line
    pub preserve_line_breaks: bool,
}

impl PoeticMode {
    pub fn new(enabled: bool, preserve_line_breaks: bool) -> Self {
        Self {
            enabled,
            preserve_line_breaks,
        }
    }

    /// Classifier for `rules` with line feeds promoted when enabled
    pub fn classifier(&self, rules: &Arc<LanguageRules>) -> SeparatorClassifier {
        rules.classifier(self.enabled)
    }

    /// Trim a raw sentence span for output
    ///
    /// Returns an empty string when nothing but whitespace is left.
    pub fn render(&self, raw: &str) -> String {
        let body = raw.trim();
        if body.is_empty() || !self.enabled {
            return body.to_string();
        }

        if self.preserve_line_breaks {
            let keep_break = raw.trim_end_matches([' ', '\t', '\r']).ends_with('\n');
            if keep_break {
                return format!("{body}\n");
            }
            body.to_string()
        } else {
            body.replace('\n', " ")
        }
    }
}
