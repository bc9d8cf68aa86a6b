//! Tokenizer adapter
//!
//! Sentence-boundary backends sit behind [`SentenceSegmenter`]. A backend
//! only reports raw boundary offsets; the context guard and the minimum
//! length policy are applied on top by [`SentenceSegmenter::segment`], so
//! every backend obeys the same contract.

pub mod candidates;
mod context;
mod custom;
mod neural;
mod rule_based;

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::heuristics::{enforce_minimum_length, LengthPolicy};
use crate::separator::SeparatorClassifier;

pub use context::apply_context_guard;
pub use custom::FnSegmenter;
pub use neural::{BoundaryModel, FeatureWeights, NeuralSegmenter};
pub use rule_based::RuleBasedSegmenter;

/// Built-in backend families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizerKind {
    /// Statistical boundary scorer
    #[default]
    #[serde(alias = "stanza")]
    Neural,
    /// Punctuation and capitalisation rules
    #[serde(alias = "nltk", alias = "rule_based")]
    RuleBased,
}

impl TokenizerKind {
    pub const ALL: [TokenizerKind; 2] = [TokenizerKind::Neural, TokenizerKind::RuleBased];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenizerKind::Neural => "neural",
            TokenizerKind::RuleBased => "rule-based",
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown tokenizer name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tokenizer '{0}' (expected 'neural' or 'rule-based')")]
pub struct ParseTokenizerKindError(String);

impl FromStr for TokenizerKind {
    type Err = ParseTokenizerKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neural" | "stanza" => Ok(TokenizerKind::Neural),
            "rule-based" | "rule_based" | "rulebased" | "nltk" => Ok(TokenizerKind::RuleBased),
            _ => Err(ParseTokenizerKindError(s.to_string())),
        }
    }
}

/// Per-call parameters for [`SentenceSegmenter::segment`]
#[derive(Debug, Clone, Copy)]
pub struct SegmentContext<'a> {
    pub classifier: &'a SeparatorClassifier,
    /// Read-ahead characters required behind a boundary
    pub context_size: usize,
    /// No more text will follow
    pub is_final: bool,
    pub lengths: LengthPolicy,
}

/// Confirmed sentence spans and the unsegmented tail
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Contiguous byte ranges starting at 0
    pub spans: Vec<Range<usize>>,
    /// Start of the remainder; `spans` cover `[0, remainder)`
    pub remainder: usize,
}

impl Segmentation {
    fn from_boundaries(boundaries: &[usize]) -> Self {
        let mut spans = Vec::with_capacity(boundaries.len());
        let mut start = 0;
        for &end in boundaries {
            spans.push(start..end);
            start = end;
        }
        Self {
            spans,
            remainder: start,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// A sentence-boundary backend
///
/// Implementations must be pure: the same text always yields the same
/// boundaries, and no state is kept between calls.
pub trait SentenceSegmenter: Send + Sync {
    /// Backend name for logs and listings
    fn name(&self) -> &str;

    /// Language code served by this instance
    fn language(&self) -> &str;

    /// Raw sentence-end byte offsets in ascending order
    ///
    /// Offsets must be character boundaries of `text`; an offset equal to
    /// `text.len()` marks a sentence ending with the text.
    fn detect(&self, text: &str, classifier: &SeparatorClassifier) -> Vec<usize>;

    /// Detect, guard and merge
    fn segment(&self, text: &str, ctx: &SegmentContext<'_>) -> Segmentation {
        let raw = self.detect(text, ctx.classifier);
        let guarded = apply_context_guard(text, raw, ctx);
        let accepted = enforce_minimum_length(text, &guarded, ctx.lengths);
        Segmentation::from_boundaries(&accepted)
    }
}

impl fmt::Debug for dyn SentenceSegmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceSegmenter")
            .field("name", &self.name())
            .field("language", &self.language())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_kind_parsing() {
        assert_eq!("neural".parse::<TokenizerKind>().unwrap(), TokenizerKind::Neural);
        assert_eq!("stanza".parse::<TokenizerKind>().unwrap(), TokenizerKind::Neural);
        assert_eq!("Rule-Based".parse::<TokenizerKind>().unwrap(), TokenizerKind::RuleBased);
        assert_eq!("nltk".parse::<TokenizerKind>().unwrap(), TokenizerKind::RuleBased);
        assert!("spacy".parse::<TokenizerKind>().is_err());
    }

    #[test]
    fn test_tokenizer_kind_serde() {
        #[derive(Deserialize)]
        struct Holder {
            tokenizer: TokenizerKind,
        }
        let h: Holder = toml::from_str("tokenizer = \"nltk\"").unwrap();
        assert_eq!(h.tokenizer, TokenizerKind::RuleBased);
        let h: Holder = toml::from_str("tokenizer = \"rule-based\"").unwrap();
        assert_eq!(h.tokenizer, TokenizerKind::RuleBased);
        assert_eq!(serde_json::to_string(&TokenizerKind::Neural).unwrap(), "\"neural\"");
    }

    #[test]
    fn test_segmentation_from_boundaries() {
        let seg = Segmentation::from_boundaries(&[3, 8]);
        assert_eq!(seg.spans, vec![0..3, 3..8]);
        assert_eq!(seg.remainder, 8);
        assert!(Segmentation::from_boundaries(&[]).is_empty());
    }
}
