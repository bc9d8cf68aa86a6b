//! Sentence boundary building blocks for streaming text
//!
//! This crate holds the stateless parts of the sentflow pipeline:
//!
//! - **Separator classification**: strong / weak / ignorable characters
//! - **Language data**: separator sets, abbreviations and thresholds loaded
//!   from TOML
//! - **Segmenters**: the neural and rule-based backends behind the
//!   [`SentenceSegmenter`] trait
//! - **Heuristics**: abbreviation and decimal filtering, the comma rule and
//!   minimum-length merging
//! - **Poetic mode** and **text cleanup** for emitted sentences
//!
//! The streaming state machine lives in `sentflow-engine`.
//!
//! # Example
//!
//! ```rust
//! use sentflow_core::heuristics::LengthPolicy;
//! use sentflow_core::language::get_rules;
//! use sentflow_core::segment::{RuleBasedSegmenter, SegmentContext, SentenceSegmenter};
//!
//! let rules = get_rules("ru").unwrap();
//! let classifier = rules.classifier(false);
//! let segmenter = RuleBasedSegmenter::new(rules);
//!
//! let text = "Это первое предложение. А вот второе!";
//! let ctx = SegmentContext {
//!     classifier: &classifier,
//!     context_size: 15,
//!     is_final: true,
//!     lengths: LengthPolicy::UNBOUNDED,
//! };
//! let segmentation = segmenter.segment(text, &ctx);
//! assert_eq!(segmentation.spans.len(), 2);
//! ```

pub mod error;
pub mod heuristics;
pub mod language;
pub mod poetic;
pub mod segment;
pub mod separator;
pub mod text;

pub use error::{CoreError, Result, TokenizerInitError};
pub use language::{get_rules, LanguageRules};
pub use poetic::PoeticMode;
pub use segment::{
    FnSegmenter, NeuralSegmenter, RuleBasedSegmenter, SegmentContext, Segmentation,
    SentenceSegmenter, TokenizerKind,
};
pub use separator::{SeparatorClass, SeparatorClassifier, SeparatorTable};
