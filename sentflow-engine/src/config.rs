//! Engine configuration
//!
//! [`EngineConfig`] is built once per engine, either through
//! [`EngineConfigBuilder`] or by deserializing a TOML table, and is never
//! mutated while a stream runs.

use serde::{Deserialize, Serialize};
use sentflow_core::{PoeticMode, TokenizerKind};

use crate::error::{EngineError, Result};

/// All tunables of one engine instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Read-ahead characters required behind a boundary of a partial buffer
    pub context_size: usize,
    /// Minimum length of every sentence but the first and the last
    pub minimum_sentence_length: usize,
    /// Minimum length of the first sentence or quick-yield fragment
    pub minimum_first_fragment_length: usize,
    /// Boundary backend
    pub tokenizer: TokenizerKind,
    /// Language code or alias
    pub language: String,
    /// Emit the first fragment as soon as a separator shows up
    pub quick_yield_single_sentence_fragment: bool,
    /// Emit one early fragment for every sentence, not just the first
    pub quick_yield_for_all_sentences: bool,
    /// Emit every fragment as soon as a separator shows up
    pub quick_yield_every_fragment: bool,
    /// Buffer ceiling in characters; exceeding it forces a flush
    pub max_buffer_size: usize,
    /// Characters received between two tokenizer passes
    pub tokenization_interval: usize,
    /// Treat line feeds as strong separators
    pub poetic_mode: bool,
    /// Keep line feeds in poetic output
    pub preserve_line_breaks: bool,
    /// Only cut at punctuation, never at bare whitespace
    pub strict_punctuation_mode: bool,
    /// Strip emoji from emitted sentences
    pub cleanup_text_emojis: bool,
    /// Log flush decisions
    pub debug: bool,
    /// Cut the first fragment at a word break after this many words
    pub force_first_fragment_after_words: Option<usize>,
    /// Drop leading characters of the stream that cannot open a sentence
    pub filter_leading_non_alphanumeric: bool,
    /// Never fetch models; a missing cached model is an error
    pub offline: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            context_size: 15,
            minimum_sentence_length: 12,
            minimum_first_fragment_length: 8,
            tokenizer: TokenizerKind::Neural,
            language: "ru".to_string(),
            quick_yield_single_sentence_fragment: false,
            quick_yield_for_all_sentences: false,
            quick_yield_every_fragment: false,
            max_buffer_size: 700,
            tokenization_interval: 6,
            poetic_mode: false,
            preserve_line_breaks: false,
            strict_punctuation_mode: false,
            cleanup_text_emojis: false,
            debug: false,
            force_first_fragment_after_words: None,
            filter_leading_non_alphanumeric: false,
            offline: false,
        }
    }
}

impl EngineConfig {
    /// Create a configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Check invariants between options
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "language must not be empty".into(),
            ));
        }

        if self.tokenization_interval == 0 {
            return Err(EngineError::InvalidConfig(
                "tokenization_interval must be greater than 0".into(),
            ));
        }

        if self.max_buffer_size <= self.context_size + self.minimum_sentence_length {
            return Err(EngineError::InvalidConfig(format!(
                "max_buffer_size ({}) must exceed context_size + minimum_sentence_length ({})",
                self.max_buffer_size,
                self.context_size + self.minimum_sentence_length
            )));
        }

        // A hard cut takes half the buffer; it must still be a full sentence
        if self.max_buffer_size / 2 < self.minimum_sentence_length {
            return Err(EngineError::InvalidConfig(format!(
                "max_buffer_size / 2 ({}) must not be below minimum_sentence_length ({})",
                self.max_buffer_size / 2,
                self.minimum_sentence_length
            )));
        }

        if self.force_first_fragment_after_words == Some(0) {
            return Err(EngineError::InvalidConfig(
                "force_first_fragment_after_words must be greater than 0".into(),
            ));
        }

        if self.preserve_line_breaks && !self.poetic_mode {
            log::warn!("preserve_line_breaks has no effect without poetic_mode");
        }

        Ok(())
    }

    /// Poetic mode switches
    pub fn poetic(&self) -> PoeticMode {
        PoeticMode::new(self.poetic_mode, self.preserve_line_breaks)
    }

    /// Whether quick-yield may fire before anything was emitted
    pub fn quick_yield_first(&self) -> bool {
        self.quick_yield_single_sentence_fragment || self.quick_yield_all()
    }

    /// Whether quick-yield re-arms for sentences after the first
    pub fn quick_yield_all(&self) -> bool {
        self.quick_yield_for_all_sentences || self.quick_yield_every_fragment
    }
}

/// Fluent builder for [`EngineConfig`]
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Create a builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read-ahead window
    pub fn context_size(mut self, chars: usize) -> Self {
        self.config.context_size = chars;
        self
    }

    /// Set the minimum sentence length
    pub fn minimum_sentence_length(mut self, chars: usize) -> Self {
        self.config.minimum_sentence_length = chars;
        self
    }

    /// Set the minimum first fragment length
    pub fn minimum_first_fragment_length(mut self, chars: usize) -> Self {
        self.config.minimum_first_fragment_length = chars;
        self
    }

    /// Select the boundary backend
    pub fn tokenizer(mut self, kind: TokenizerKind) -> Self {
        self.config.tokenizer = kind;
        self
    }

    /// Set the language by code or alias
    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.config.language = code.into();
        self
    }

    /// Emit the first fragment early
    pub fn quick_yield_single_sentence_fragment(mut self, enabled: bool) -> Self {
        self.config.quick_yield_single_sentence_fragment = enabled;
        self
    }

    /// Emit one early fragment per sentence
    pub fn quick_yield_for_all_sentences(mut self, enabled: bool) -> Self {
        self.config.quick_yield_for_all_sentences = enabled;
        self
    }

    /// Emit every fragment early
    pub fn quick_yield_every_fragment(mut self, enabled: bool) -> Self {
        self.config.quick_yield_every_fragment = enabled;
        self
    }

    /// Set the buffer ceiling in characters
    pub fn max_buffer_size(mut self, chars: usize) -> Self {
        self.config.max_buffer_size = chars;
        self
    }

    /// Set the flush interval in characters
    pub fn tokenization_interval(mut self, chars: usize) -> Self {
        self.config.tokenization_interval = chars;
        self
    }

    /// Enable poetic mode
    pub fn poetic_mode(mut self, enabled: bool) -> Self {
        self.config.poetic_mode = enabled;
        self
    }

    /// Keep line feeds in poetic output
    pub fn preserve_line_breaks(mut self, enabled: bool) -> Self {
        self.config.preserve_line_breaks = enabled;
        self
    }

    /// Only cut at punctuation
    pub fn strict_punctuation_mode(mut self, enabled: bool) -> Self {
        self.config.strict_punctuation_mode = enabled;
        self
    }

    /// Strip emoji from output
    pub fn cleanup_text_emojis(mut self, enabled: bool) -> Self {
        self.config.cleanup_text_emojis = enabled;
        self
    }

    /// Log flush decisions
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    /// Cut the first fragment after this many words
    pub fn force_first_fragment_after_words(mut self, words: Option<usize>) -> Self {
        self.config.force_first_fragment_after_words = words;
        self
    }

    /// Drop leading non-alphanumeric characters of the stream
    pub fn filter_leading_non_alphanumeric(mut self, enabled: bool) -> Self {
        self.config.filter_leading_non_alphanumeric = enabled;
        self
    }

    /// Forbid model downloads
    pub fn offline(mut self, enabled: bool) -> Self {
        self.config.offline = enabled;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
