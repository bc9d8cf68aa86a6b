//! Statistical boundary scorer
//!
//! Every strong separator run is described by a small binary feature
//! vector and scored with a logistic unit. Weights come from a JSON model
//! file; a default model is bundled.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::candidates::{lead_char, next_alpha, scan_runs, token_before, SeparatorRun};
use super::SentenceSegmenter;
use crate::error::TokenizerInitError;
use crate::heuristics::{is_short_alpha, suppresses_boundary};
use crate::language::{AbbreviationKind, LanguageRules};
use crate::separator::SeparatorClassifier;

const BUNDLED_MODEL: &str = include_str!("../../configs/models/default.json");

/// Feature weights of the boundary model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureWeights {
    pub followed_by_space: f64,
    pub end_of_text: f64,
    pub next_upper: f64,
    pub next_lower: f64,
    pub next_digit: f64,
    pub next_opening: f64,
    pub emphatic_terminal: f64,
    pub known_abbreviation: f64,
    pub title_abbreviation: f64,
    pub short_token: f64,
    pub decimal: f64,
    pub line_break: f64,
}

impl FeatureWeights {
    fn values(&self) -> [f64; 12] {
        [
            self.followed_by_space,
            self.end_of_text,
            self.next_upper,
            self.next_lower,
            self.next_digit,
            self.next_opening,
            self.emphatic_terminal,
            self.known_abbreviation,
            self.title_abbreviation,
            self.short_token,
            self.decimal,
            self.line_break,
        ]
    }
}

/// Logistic boundary model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryModel {
    pub name: String,
    /// Minimum probability for a boundary
    pub threshold: f64,
    pub bias: f64,
    pub weights: FeatureWeights,
}

impl BoundaryModel {
    /// Model shipped with the crate
    pub fn bundled() -> Result<Self, TokenizerInitError> {
        Self::from_json_str(BUNDLED_MODEL)
    }

    pub fn from_json_str(json: &str) -> Result<Self, TokenizerInitError> {
        let model: BoundaryModel =
            serde_json::from_str(json).map_err(|e| TokenizerInitError::InvalidModel(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TokenizerInitError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TokenizerInitError::ModelIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), TokenizerInitError> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(TokenizerInitError::InvalidModel(format!(
                "threshold {} outside (0, 1)",
                self.threshold
            )));
        }
        if !self.bias.is_finite() || self.weights.values().iter().any(|w| !w.is_finite()) {
            return Err(TokenizerInitError::InvalidModel(
                "weights must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Boundary probability for a feature vector
    fn probability(&self, features: &[bool; 12]) -> f64 {
        let mut z = self.bias;
        for (weight, on) in self.weights.values().iter().zip(features.iter()) {
            if *on {
                z += weight;
            }
        }
        1.0 / (1.0 + (-z).exp())
    }
}

/// Neural sentence splitter over a [`BoundaryModel`]
#[derive(Debug, Clone)]
pub struct NeuralSegmenter {
    rules: Arc<LanguageRules>,
    model: BoundaryModel,
    debug: bool,
}

impl NeuralSegmenter {
    pub fn new(rules: Arc<LanguageRules>, model: BoundaryModel) -> Self {
        Self {
            rules,
            model,
            debug: false,
        }
    }

    /// Load the model for `rules` from `model_dir`, falling back to the
    /// bundled weights
    ///
    /// `model_dir/<code>.json` is used when present. A missing file is an
    /// error in offline mode; otherwise the bundled model is used.
    pub fn load(
        rules: Arc<LanguageRules>,
        model_dir: Option<&Path>,
        offline: bool,
    ) -> Result<Self, TokenizerInitError> {
        let model = match model_dir {
            Some(dir) => {
                let path = model_path(dir, rules.code());
                if path.is_file() {
                    log::debug!("Loading boundary model from {}", path.display());
                    BoundaryModel::from_file(&path)?
                } else if offline {
                    return Err(TokenizerInitError::ModelUnavailable {
                        language: rules.code().to_string(),
                        path,
                    });
                } else {
                    log::warn!(
                        "No boundary model at {}, using bundled weights",
                        path.display()
                    );
                    BoundaryModel::bundled()?
                }
            }
            None => BoundaryModel::bundled()?,
        };
        Ok(Self::new(rules, model))
    }

    /// Log every scored candidate
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn model(&self) -> &BoundaryModel {
        &self.model
    }

    fn features(&self, text: &str, run: &SeparatorRun, classifier: &SeparatorClassifier) -> [bool; 12] {
        let next = next_alpha(text, run.end, classifier);
        let abbreviation = if run.only_periods {
            self.rules.abbreviation(token_before(text, run.start))
        } else {
            None
        };
        let short_token = run.only_periods
            && abbreviation.is_none()
            && is_short_alpha(token_before(text, run.start), self.rules.abbreviation_max_len());

        [
            run.next_char.is_some_and(char::is_whitespace),
            run.next_char.is_none(),
            next.is_some_and(char::is_uppercase),
            next.is_some_and(char::is_lowercase),
            next.is_some_and(|c| c.is_numeric()),
            lead_char(text, run.end).is_some_and(|c| classifier.is_ignorable(c)),
            run.emphatic,
            abbreviation == Some(AbbreviationKind::Common),
            abbreviation == Some(AbbreviationKind::Title),
            short_token,
            run.is_decimal(text),
            run.has_line_break,
        ]
    }
}

/// Cache location of the model for `language`
pub(crate) fn model_path(dir: &Path, language: &str) -> PathBuf {
    dir.join(format!("{language}.json"))
}

impl SentenceSegmenter for NeuralSegmenter {
    fn name(&self) -> &str {
        "neural"
    }

    fn language(&self) -> &str {
        self.rules.code()
    }

    fn detect(&self, text: &str, classifier: &SeparatorClassifier) -> Vec<usize> {
        let mut boundaries = Vec::new();

        for run in scan_runs(text, classifier).iter().filter(|r| r.is_strong()) {
            let p = self.model.probability(&self.features(text, run, classifier));
            if self.debug {
                log::debug!("boundary candidate at byte {}: p = {p:.3}", run.end);
            }
            if p >= self.model.threshold && !suppresses_boundary(text, run, &self.rules, classifier) {
                boundaries.push(run.end);
            }
        }

        boundaries
    }
}
