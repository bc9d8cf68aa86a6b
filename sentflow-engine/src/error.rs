//! Engine error types

use sentflow_core::{CoreError, TokenizerInitError, TokenizerKind};
use thiserror::Error;

/// Boxed error raised by a chunk source
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A backend was looked up before `init_tokenizer` succeeded, or after
    /// it was torn down
    #[error("{kind} tokenizer for '{language}' is not initialized")]
    UninitializedTokenizer {
        /// Requested backend
        kind: TokenizerKind,
        /// Requested language
        language: String,
    },

    /// Backend initialization failed
    #[error("tokenizer initialization failed: {0}")]
    TokenizerInit(#[from] TokenizerInitError),

    /// The chunk source failed
    #[error("input source failed: {0}")]
    InputSource(#[source] SourceError),

    /// Push or finish after the engine completed or was closed
    #[error("engine is closed")]
    EngineClosed,

    /// Configuration rejected at build time
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Language data error
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
