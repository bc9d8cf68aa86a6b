//! Streaming sentence segmentation engine
//!
//! Turns an incrementally arriving stream of text fragments, such as the
//! tokens of a language model, into a demand-driven sequence of sentences
//! for a speech synthesizer.
//!
//! - [`StreamAccumulator`] owns the buffer and the flush / quick-yield policy
//! - [`TokenizerPool`] initializes sentence-boundary backends once and shares
//!   them between engines
//! - [`Sequencer`] drives the accumulator from a synchronous iterator
//!   ([`SentenceIter`]) or an asynchronous stream ([`SentenceStream`])
//!
//! # Example
//!
//! ```rust
//! use sentflow_engine::{generate_sentences, EngineConfig};
//!
//! let chunks = [
//!     "Это первое предложение. А вот второе! И третье, ",
//!     "которое продолжается. Завершающее предложение.",
//! ];
//! let sentences: Vec<String> = generate_sentences(chunks, EngineConfig::default())
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(sentences.len(), 4);
//! assert_eq!(sentences[1], "А вот второе!");
//! ```

#![warn(missing_docs)]

pub mod accumulator;
pub mod config;
pub mod error;
pub mod sequencer;
pub mod tokenizers;

pub use accumulator::{AccumulatorState, StreamAccumulator};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use error::{EngineError, Result, SourceError};
pub use sequencer::{generate_sentences, SentenceIter, SentenceStream, Sequencer};
pub use tokenizers::TokenizerPool;

// Re-export from core for convenience
pub use sentflow_core::{FnSegmenter, SentenceSegmenter, TokenizerKind};
