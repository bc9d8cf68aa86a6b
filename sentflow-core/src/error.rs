//! Core error types

use std::path::PathBuf;
use thiserror::Error;

use crate::segment::TokenizerKind;

/// Errors raised while loading language data
#[derive(Debug, Error)]
pub enum CoreError {
    /// Language code not known to the loader
    #[error("unsupported language: {code}")]
    UnsupportedLanguage {
        /// The requested language code
        code: String,
    },

    /// Language configuration could not be parsed or failed validation
    #[error("invalid language configuration: {0}")]
    InvalidLanguageConfig(String),

    /// Language configuration file could not be read
    #[error("failed to read language configuration {path}: {source}")]
    LanguageConfigIo {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while bringing a tokenizer backend up
#[derive(Debug, Error)]
pub enum TokenizerInitError {
    /// Language data for the backend is unavailable
    #[error("{kind} tokenizer cannot be initialized: {source}")]
    Language {
        /// Backend being initialized
        kind: TokenizerKind,
        /// Loader failure
        #[source]
        source: CoreError,
    },

    /// Offline mode was requested and the model cache has no entry
    #[error("no cached model for '{language}' at {} (offline mode)", path.display())]
    ModelUnavailable {
        /// Language the model was requested for
        language: String,
        /// Expected cache location
        path: PathBuf,
    },

    /// Model file exists but could not be read
    #[error("failed to read model {path}: {source}")]
    ModelIo {
        /// Model file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Model file is not a valid boundary model
    #[error("invalid boundary model: {0}")]
    InvalidModel(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_language_display() {
        let err = CoreError::UnsupportedLanguage {
            code: "xx".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported language: xx");
    }

    #[test]
    fn test_model_unavailable_mentions_path() {
        let err = TokenizerInitError::ModelUnavailable {
            language: "ru".to_string(),
            path: PathBuf::from("/models/ru.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("ru"));
        assert!(msg.contains("/models/ru.json"));
        assert!(msg.contains("offline"));
    }
}
