//! Caller-supplied sentence splitting

use std::fmt;

use super::SentenceSegmenter;
use crate::separator::SeparatorClassifier;

type SplitFn = dyn Fn(&str) -> Vec<String> + Send + Sync;

/// Adapter for a plain `text -> sentences` function
///
/// The returned sentences are located in the input, in order, to recover
/// boundary offsets. Sentences that cannot be found are skipped.
pub struct FnSegmenter {
    name: String,
    language: String,
    split: Box<SplitFn>,
}

impl FnSegmenter {
    pub fn new<F>(name: impl Into<String>, language: impl Into<String>, split: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            language: language.into(),
            split: Box::new(split),
        }
    }
}

impl fmt::Debug for FnSegmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSegmenter")
            .field("name", &self.name)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl SentenceSegmenter for FnSegmenter {
    fn name(&self) -> &str {
        &self.name
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn detect(&self, text: &str, _classifier: &SeparatorClassifier) -> Vec<usize> {
        let mut boundaries = Vec::new();
        let mut cursor = 0;

        for sentence in (self.split)(text) {
            let needle = sentence.trim();
            if needle.is_empty() {
                continue;
            }
            match text[cursor..].find(needle) {
                Some(offset) => {
                    cursor += offset + needle.len();
                    boundaries.push(cursor);
                }
                None => log::warn!("{}: sentence not found in input: {needle:?}", self.name),
            }
        }

        boundaries
    }
}
