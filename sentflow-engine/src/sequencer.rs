//! Sequencer
//!
//! Drives a [`StreamAccumulator`] from an input source and hands sentences
//! to the consumer on demand. One core does the work; [`SentenceIter`]
//! pulls chunks synchronously and [`SentenceStream`] polls them from an
//! asynchronous source.

use std::convert::Infallible;
use std::iter::FusedIterator;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::accumulator::StreamAccumulator;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result, SourceError};
use crate::tokenizers::TokenizerPool;

/// State shared by both adapters
#[derive(Debug)]
struct SequencerCore {
    accumulator: StreamAccumulator,
    pending_error: Option<EngineError>,
    input_done: bool,
}

impl SequencerCore {
    fn new(accumulator: StreamAccumulator) -> Self {
        Self {
            accumulator,
            pending_error: None,
            input_done: false,
        }
    }

    /// Queued sentences first, then a pending error
    fn next_ready(&mut self) -> Option<Result<String>> {
        if let Some(sentence) = self.accumulator.pop() {
            return Some(Ok(sentence));
        }
        self.pending_error.take().map(Err)
    }

    fn on_chunk<T, E>(&mut self, chunk: std::result::Result<T, E>)
    where
        T: AsRef<str>,
        E: Into<SourceError>,
    {
        match chunk {
            Ok(text) => {
                if let Err(e) = self.accumulator.push(text.as_ref()) {
                    self.fail(e);
                }
            }
            Err(e) => {
                self.accumulator.recover();
                self.pending_error = Some(EngineError::InputSource(e.into()));
                self.input_done = true;
            }
        }
    }

    fn on_end(&mut self) {
        if let Err(e) = self.accumulator.finish() {
            self.fail(e);
        }
        self.input_done = true;
    }

    fn fail(&mut self, error: EngineError) {
        log::debug!("stream terminated: {error}");
        self.accumulator.close();
        self.pending_error = Some(error);
        self.input_done = true;
    }
}

/// Synchronous sentence sequence over an iterator of chunks
pub struct SentenceIter<I> {
    core: SequencerCore,
    input: I,
}

impl<I> std::fmt::Debug for SentenceIter<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceIter")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<I, T, E> Iterator for SentenceIter<I>
where
    I: Iterator<Item = std::result::Result<T, E>>,
    T: AsRef<str>,
    E: Into<SourceError>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.core.next_ready() {
                return Some(item);
            }
            if self.core.input_done {
                return None;
            }
            match self.input.next() {
                Some(chunk) => self.core.on_chunk(chunk),
                None => self.core.on_end(),
            }
        }
    }
}

impl<I, T, E> FusedIterator for SentenceIter<I>
where
    I: Iterator<Item = std::result::Result<T, E>>,
    T: AsRef<str>,
    E: Into<SourceError>,
{
}

/// Asynchronous sentence sequence over a stream of chunks
#[derive(Debug)]
pub struct SentenceStream<S> {
    core: SequencerCore,
    input: S,
}

impl<S, T, E> Stream for SentenceStream<S>
where
    S: Stream<Item = std::result::Result<T, E>> + Unpin,
    T: AsRef<str>,
    E: Into<SourceError>,
{
    type Item = Result<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(item) = this.core.next_ready() {
                return Poll::Ready(Some(item));
            }
            if this.core.input_done {
                return Poll::Ready(None);
            }
            match Pin::new(&mut this.input).poll_next(cx) {
                Poll::Ready(Some(chunk)) => this.core.on_chunk(chunk),
                Poll::Ready(None) => this.core.on_end(),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Entry point: binds a configuration to a tokenizer pool
#[derive(Debug, Clone)]
pub struct Sequencer {
    config: EngineConfig,
    pool: Arc<TokenizerPool>,
}

impl Sequencer {
    /// Create a sequencer; each call to a `sentences*` method starts a new
    /// independent engine
    pub fn new(config: EngineConfig, pool: Arc<TokenizerPool>) -> Self {
        Self { config, pool }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared tokenizer pool
    pub fn pool(&self) -> &Arc<TokenizerPool> {
        &self.pool
    }

    fn core(&self) -> Result<SequencerCore> {
        let accumulator = StreamAccumulator::new(self.config.clone(), Arc::clone(&self.pool))?;
        Ok(SequencerCore::new(accumulator))
    }

    /// Sentences from an infallible chunk source
    pub fn sentences<I>(
        &self,
        chunks: I,
    ) -> Result<SentenceIter<impl Iterator<Item = std::result::Result<I::Item, Infallible>>>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(SentenceIter {
            core: self.core()?,
            input: chunks.into_iter().map(Ok::<I::Item, Infallible>),
        })
    }

    /// Sentences from a fallible chunk source
    pub fn try_sentences<I, T, E>(&self, chunks: I) -> Result<SentenceIter<I::IntoIter>>
    where
        I: IntoIterator<Item = std::result::Result<T, E>>,
        T: AsRef<str>,
        E: Into<SourceError>,
    {
        Ok(SentenceIter {
            core: self.core()?,
            input: chunks.into_iter(),
        })
    }

    /// Sentences from an asynchronous chunk source
    pub fn sentence_stream<S, T, E>(&self, chunks: S) -> Result<SentenceStream<S>>
    where
        S: Stream<Item = std::result::Result<T, E>> + Unpin,
        T: AsRef<str>,
        E: Into<SourceError>,
    {
        Ok(SentenceStream {
            core: self.core()?,
            input: chunks,
        })
    }
}

/// Split a chunk sequence into sentences with a private, lazily
/// initialized tokenizer pool
pub fn generate_sentences<I>(
    chunks: I,
    config: EngineConfig,
) -> Result<SentenceIter<impl Iterator<Item = std::result::Result<I::Item, Infallible>>>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Sequencer::new(config, Arc::new(TokenizerPool::lazy())).sentences(chunks)
}
