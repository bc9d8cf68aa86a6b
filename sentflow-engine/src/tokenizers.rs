//! Tokenizer pool
//!
//! Backends are initialized once per (kind, language) and shared by every
//! engine holding the pool. The pool is an explicit, caller-held handle:
//! dropping it (or calling [`TokenizerPool::teardown`]) releases the
//! backends.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use sentflow_core::language::get_rules;
use sentflow_core::{
    CoreError, LanguageRules, NeuralSegmenter, RuleBasedSegmenter, SentenceSegmenter,
    TokenizerInitError, TokenizerKind,
};

use crate::error::{EngineError, Result};

type Key = (TokenizerKind, String);

/// Shared registry of initialized sentence segmenters
#[derive(Debug, Default)]
pub struct TokenizerPool {
    entries: RwLock<HashMap<Key, Arc<dyn SentenceSegmenter>>>,
    languages: RwLock<HashMap<String, Arc<LanguageRules>>>,
    model_dir: Option<PathBuf>,
    lazy: bool,
}

impl TokenizerPool {
    /// Pool that requires an explicit `init_tokenizer` per backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool that initializes backends on first use
    pub fn lazy() -> Self {
        Self {
            lazy: true,
            ..Self::default()
        }
    }

    /// Look for neural models in `dir` (`<dir>/<language>.json`)
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    /// Model cache directory, if any
    pub fn model_dir(&self) -> Option<&Path> {
        self.model_dir.as_deref()
    }

    /// Make external language data available to the pool
    pub fn register_language(&self, rules: LanguageRules) -> Arc<LanguageRules> {
        let rules = Arc::new(rules);
        let mut languages = self.languages.write().unwrap_or_else(PoisonError::into_inner);
        for alias in rules.aliases() {
            languages.insert(alias.clone(), Arc::clone(&rules));
        }
        languages.insert(rules.code().to_string(), Arc::clone(&rules));
        log::debug!("Registered language '{}'", rules.code());
        rules
    }

    /// Language rules by code or alias, registered languages first
    pub fn rules(&self, code: &str) -> std::result::Result<Arc<LanguageRules>, CoreError> {
        let key = code.trim().to_lowercase();
        let registered = self
            .languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        match registered {
            Some(rules) => Ok(rules),
            None => get_rules(&key),
        }
    }

    /// Canonical pool key for a language code or alias
    fn key(&self, kind: TokenizerKind, language: &str) -> Key {
        let code = match self.rules(language) {
            Ok(rules) => rules.code().to_string(),
            Err(_) => language.trim().to_lowercase(),
        };
        (kind, code)
    }

    /// Initialize a backend, or return the one already initialized
    pub fn init_tokenizer(
        &self,
        kind: TokenizerKind,
        language: &str,
        offline: bool,
        debug: bool,
    ) -> std::result::Result<Arc<dyn SentenceSegmenter>, TokenizerInitError> {
        let rules = self
            .rules(language)
            .map_err(|source| TokenizerInitError::Language { kind, source })?;
        let key = (kind, rules.code().to_string());

        if let Some(existing) = self.lookup(&key) {
            return Ok(existing);
        }

        let segmenter: Arc<dyn SentenceSegmenter> = match kind {
            TokenizerKind::Neural => Arc::new(
                NeuralSegmenter::load(Arc::clone(&rules), self.model_dir(), offline)?
                    .with_debug(debug),
            ),
            TokenizerKind::RuleBased => Arc::new(RuleBasedSegmenter::new(Arc::clone(&rules))),
        };

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(key).or_insert_with(|| {
            log::info!("Initialized {kind} tokenizer for '{}'", rules.code());
            segmenter
        });
        Ok(Arc::clone(entry))
    }

    /// Install a custom backend for a kind and language
    ///
    /// Replaces any backend already initialized for that slot.
    pub fn install(&self, kind: TokenizerKind, language: &str, segmenter: Arc<dyn SentenceSegmenter>) {
        let key = self.key(kind, language);
        log::debug!("Installing '{}' as {kind} tokenizer for '{}'", segmenter.name(), key.1);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, segmenter);
    }

    /// Release a backend; returns whether one was initialized
    pub fn teardown(&self, kind: TokenizerKind, language: &str) -> bool {
        let key = self.key(kind, language);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key)
            .is_some()
    }

    /// Whether a backend is ready for use
    pub fn is_ready(&self, kind: TokenizerKind, language: &str) -> bool {
        self.lookup(&self.key(kind, language)).is_some()
    }

    /// Initialized backend for a kind and language
    pub fn get(&self, kind: TokenizerKind, language: &str) -> Result<Arc<dyn SentenceSegmenter>> {
        let key = self.key(kind, language);
        self.lookup(&key)
            .ok_or(EngineError::UninitializedTokenizer {
                kind,
                language: key.1,
            })
    }

    /// Backend for a flush: initialized on demand by lazy pools
    pub(crate) fn resolve(
        &self,
        kind: TokenizerKind,
        language: &str,
        offline: bool,
        debug: bool,
    ) -> Result<Arc<dyn SentenceSegmenter>> {
        if self.lazy {
            Ok(self.init_tokenizer(kind, language, offline, debug)?)
        } else {
            self.get(kind, language)
        }
    }

    fn lookup(&self, key: &Key) -> Option<Arc<dyn SentenceSegmenter>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}
