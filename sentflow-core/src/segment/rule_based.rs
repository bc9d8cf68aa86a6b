//! Punctuation and capitalisation rules

use std::sync::Arc;

use super::candidates::{next_alpha, scan_runs};
use super::SentenceSegmenter;
use crate::heuristics::suppresses_boundary;
use crate::language::LanguageRules;
use crate::separator::SeparatorClassifier;

/// Rule-based sentence splitter
///
/// A strong run ends a sentence when it is followed by whitespace and the
/// next word does not start lowercase. Line-break runs always end one.
/// Decimal points and abbreviations are filtered out.
#[derive(Debug, Clone)]
pub struct RuleBasedSegmenter {
    rules: Arc<LanguageRules>,
}

impl RuleBasedSegmenter {
    pub fn new(rules: Arc<LanguageRules>) -> Self {
        Self { rules }
    }
}

impl SentenceSegmenter for RuleBasedSegmenter {
    fn name(&self) -> &str {
        "rule-based"
    }

    fn language(&self) -> &str {
        self.rules.code()
    }

    fn detect(&self, text: &str, classifier: &SeparatorClassifier) -> Vec<usize> {
        scan_runs(text, classifier)
            .iter()
            .filter(|run| run.is_strong())
            .filter(|run| {
                if run.has_line_break {
                    return true;
                }
                match run.next_char {
                    None => true,
                    Some(c) if c.is_whitespace() => {
                        !next_alpha(text, run.end, classifier).is_some_and(char::is_lowercase)
                    }
                    Some(_) => false,
                }
            })
            .filter(|run| !suppresses_boundary(text, run, &self.rules, classifier))
            .map(|run| run.end)
            .collect()
    }
}
