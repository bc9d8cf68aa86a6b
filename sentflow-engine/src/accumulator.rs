//! Stream accumulator
//!
//! Owns the text buffer of one stream and decides when to run the
//! tokenizer: every `tokenization_interval` characters, when the buffer
//! outgrows `max_buffer_size`, and once more at end of data. Between
//! flushes it may emit quick-yield fragments.
//!
//! The buffer always holds exactly the part of the stream that has not yet
//! been consumed. Text up to the `surfaced` cursor has already been emitted
//! as a fragment and is never emitted again. A confirmed sentence whose
//! unsurfaced rest is too short stays in the buffer and is merged into the
//! next sentence.

use std::collections::VecDeque;
use std::sync::Arc;

use sentflow_core::heuristics::{
    is_usable_weak, needs_lookahead, suppresses_boundary, LengthPolicy,
};
use sentflow_core::segment::candidates::{lead_char, scan_runs};
use sentflow_core::text::{is_sentence_opener, strip_emojis};
use sentflow_core::{
    LanguageRules, PoeticMode, SegmentContext, SeparatorClass, SeparatorClassifier,
};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::tokenizers::TokenizerPool;

/// Lifecycle of an accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    /// No chunk received yet
    Idle,
    /// Buffering chunks
    Accumulating,
    /// Tokenizer pass in progress
    Flushing,
    /// Input exhausted, emitting the remainder
    Draining,
    /// Terminal
    Done,
}

/// Buffering and flush policy for one stream
#[derive(Debug)]
pub struct StreamAccumulator {
    config: EngineConfig,
    pool: Arc<TokenizerPool>,
    rules: Arc<LanguageRules>,
    classifier: SeparatorClassifier,
    poetic: PoeticMode,
    state: AccumulatorState,
    buffer: String,
    /// Byte offset in `buffer` up to which text was emitted as a fragment
    surfaced: usize,
    /// End of confirmed text held back to merge with the next sentence
    held: usize,
    /// Quick-yield may emit the next fragment
    armed: bool,
    pending_chars: usize,
    emitted: usize,
    leading_filtered: bool,
    ready: VecDeque<String>,
}

impl StreamAccumulator {
    /// Create an accumulator
    ///
    /// Fails fast when the configured backend is not available in `pool`.
    pub fn new(config: EngineConfig, pool: Arc<TokenizerPool>) -> Result<Self> {
        config.validate()?;
        let rules = pool.rules(&config.language)?;
        pool.resolve(config.tokenizer, rules.code(), config.offline, config.debug)?;

        let poetic = config.poetic();
        let classifier = poetic.classifier(&rules);
        let armed = config.quick_yield_first();

        Ok(Self {
            config,
            pool,
            rules,
            classifier,
            poetic,
            state: AccumulatorState::Idle,
            buffer: String::new(),
            surfaced: 0,
            held: 0,
            armed,
            pending_chars: 0,
            emitted: 0,
            leading_filtered: false,
            ready: VecDeque::new(),
        })
    }

    /// Current state
    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    /// Characters currently buffered, surfaced text included
    pub fn buffered_chars(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Sentences and fragments emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Next sentence ready for the consumer
    pub fn pop(&mut self) -> Option<String> {
        self.ready.pop_front()
    }

    /// Append a chunk and run whatever the flush policy calls for
    pub fn push(&mut self, chunk: &str) -> Result<()> {
        if self.state == AccumulatorState::Done {
            return Err(EngineError::EngineClosed);
        }
        if self.state == AccumulatorState::Idle {
            self.state = AccumulatorState::Accumulating;
        }
        log::trace!("chunk: {chunk:?}");

        let chunk = self.filter_leading(chunk);
        if chunk.is_empty() {
            return Ok(());
        }
        self.buffer.push_str(chunk);
        self.pending_chars += chunk.chars().count();

        // Quick-yield runs before any flush decision on the same chunk
        self.quick_yield();

        if self.buffered_chars() > self.config.max_buffer_size {
            self.forced_flush()
        } else if self.pending_chars >= self.config.tokenization_interval {
            self.flush(false)
        } else {
            Ok(())
        }
    }

    /// Signal end of data: final flush, then drain the remainder
    pub fn finish(&mut self) -> Result<()> {
        match self.state {
            AccumulatorState::Done => return Err(EngineError::EngineClosed),
            AccumulatorState::Idle => {
                self.state = AccumulatorState::Done;
                return Ok(());
            }
            _ => {}
        }

        self.flush(true)?;

        self.state = AccumulatorState::Draining;
        let start = self.surfaced.min(self.buffer.len());
        if let Some(sentence) = self.finish_sentence(&self.buffer[start..]) {
            self.push_ready(sentence);
        }
        self.release();
        self.state = AccumulatorState::Done;
        Ok(())
    }

    /// Best-effort extraction after an input failure, then close
    ///
    /// Every sentence terminated inside the buffer is queued, with no
    /// read-ahead required; the unterminated tail is dropped.
    pub fn recover(&mut self) {
        if self.state == AccumulatorState::Accumulating {
            match self.flush(true) {
                Ok(()) => {
                    let (start, end) = (self.surfaced, self.held);
                    if end > start {
                        self.emit_range(start, end);
                    }
                }
                Err(e) => log::debug!("flush during recovery failed: {e}"),
            }
        }
        self.close();
    }

    /// Stop accepting input and release the buffer
    ///
    /// Sentences already queued can still be popped.
    pub fn close(&mut self) {
        self.release();
        self.state = AccumulatorState::Done;
    }

    fn release(&mut self) {
        self.buffer = String::new();
        self.surfaced = 0;
        self.held = 0;
        self.pending_chars = 0;
    }

    fn filter_leading<'a>(&mut self, chunk: &'a str) -> &'a str {
        if !self.config.filter_leading_non_alphanumeric || self.leading_filtered {
            return chunk;
        }
        let kept = chunk.trim_start_matches(|c: char| !is_sentence_opener(c));
        if !kept.is_empty() {
            self.leading_filtered = true;
        }
        kept
    }

    /// Run the tokenizer over the buffer and queue confirmed sentences
    fn flush(&mut self, is_final: bool) -> Result<()> {
        self.state = AccumulatorState::Flushing;
        let segmenter = match self.pool.resolve(
            self.config.tokenizer,
            self.rules.code(),
            self.config.offline,
            self.config.debug,
        ) {
            Ok(segmenter) => segmenter,
            Err(e) => {
                self.state = AccumulatorState::Accumulating;
                return Err(e);
            }
        };

        let ctx = SegmentContext {
            classifier: &self.classifier,
            context_size: self.config.context_size,
            is_final,
            lengths: LengthPolicy {
                minimum_sentence_length: self.config.minimum_sentence_length,
                minimum_first_fragment_length: self.config.minimum_first_fragment_length,
                first_sentence: self.emitted == 0,
            },
        };
        let segmentation = segmenter.segment(&self.buffer, &ctx);

        if self.config.debug {
            log::debug!(
                "{} flush over {} chars: {} sentence(s), remainder at byte {}",
                if is_final { "final" } else { "interval" },
                self.buffered_chars(),
                segmentation.spans.len(),
                segmentation.remainder
            );
        }

        // The sentence holding the surfaced cursor is now closed
        if segmentation
            .spans
            .last()
            .is_some_and(|span| span.end >= self.surfaced)
        {
            self.armed = self.config.quick_yield_all();
        }

        let mut carry = None;
        for span in &segmentation.spans {
            let from = carry.unwrap_or(span.start).max(self.surfaced);
            if from >= span.end {
                continue;
            }
            if from > span.start && self.is_short(&self.buffer[from..span.end]) {
                carry = Some(from);
                continue;
            }
            self.emit_range(from, span.end);
            carry = None;
        }

        match (carry, segmentation.spans.last()) {
            (Some(from), Some(last)) => {
                if is_final && self.buffer[segmentation.remainder..].trim().is_empty() {
                    self.emit_range(from, last.end);
                    self.consume(segmentation.remainder);
                } else {
                    self.held = last.end;
                    self.consume(from);
                }
            }
            _ => self.consume(segmentation.remainder),
        }
        self.pending_chars = 0;
        self.state = AccumulatorState::Accumulating;
        Ok(())
    }

    /// Normal flush, then cut the buffer down to `max_buffer_size`
    fn forced_flush(&mut self) -> Result<()> {
        let max = self.config.max_buffer_size;
        log::warn!(
            "buffer holds {} chars (limit {max}), forcing a flush",
            self.buffered_chars()
        );
        self.flush(false)?;

        if self.surfaced > 0 {
            self.consume(self.surfaced);
        }

        while self.buffered_chars() > max {
            let lead = self.buffer.len() - self.buffer.trim_start().len();
            self.consume(lead);
            if self.buffered_chars() <= max {
                break;
            }
            let cut = self.forced_cut(max);
            if let Some(sentence) = self.finish_sentence(&self.buffer[..cut]) {
                self.push_ready(sentence);
            }
            self.consume(cut);
        }
        Ok(())
    }

    /// Cut position for an oversized buffer that starts with a visible
    /// character
    ///
    /// The last separator (or word end, outside strict mode) between
    /// `max / 2` and `max` characters; otherwise a hard cut at the first
    /// visible character from `max / 2` on. Every choice leaves at least
    /// `max / 2` characters before the cut once trimmed.
    fn forced_cut(&self, max: usize) -> usize {
        let half = (max / 2).max(1);
        let mut mid = self.buffer.len();
        let mut hard = None;
        let mut best = None;
        let mut prev_visible = false;

        for (i, (pos, ch)) in self.buffer.char_indices().enumerate() {
            if i >= max {
                break;
            }
            if i == half {
                mid = pos;
            }
            if i >= half {
                let visible = !ch.is_whitespace();
                if hard.is_none() && prev_visible {
                    hard = Some(pos);
                }
                if self.classifier.classify(ch).is_separator() && (visible || prev_visible) {
                    best = Some(pos + ch.len_utf8());
                } else if !self.config.strict_punctuation_mode && !visible && prev_visible {
                    best = Some(pos);
                }
            }
            prev_visible = !ch.is_whitespace();
        }

        best.or(hard).unwrap_or(mid)
    }

    /// Emit quick-yield fragments while armed
    ///
    /// A fragment disarms quick-yield until the tokenizer confirms the end
    /// of its sentence. Fragments that end a sentence themselves keep it
    /// armed with `quick_yield_for_all_sentences`; with
    /// `quick_yield_every_fragment` it never disarms.
    fn quick_yield(&mut self) {
        if !self.armed {
            return;
        }

        while let Some((end, strong)) = self.next_fragment_end() {
            let start = self.surfaced;
            if self.config.debug {
                log::debug!("quick-yield fragment at bytes {start}..{end}");
            }
            if let Some(fragment) = self.finish_sentence(&self.buffer[start..end]) {
                self.push_ready(fragment);
            }
            self.surfaced = end;

            let rearm = self.config.quick_yield_every_fragment
                || (strong && self.config.quick_yield_all());
            if !rearm {
                self.armed = false;
                break;
            }
        }
    }

    /// End of the next quick-yield fragment past the surfaced cursor, and
    /// whether it ends at a strong separator
    fn next_fragment_end(&self) -> Option<(usize, bool)> {
        let text = &self.buffer[self.surfaced..];
        let min_chars = if self.emitted == 0 {
            self.config.minimum_first_fragment_length
        } else {
            self.config.minimum_sentence_length
        };

        for run in scan_runs(text, &self.classifier).iter() {
            let lookahead = match run.class {
                SeparatorClass::Strong => {
                    if suppresses_boundary(text, run, &self.rules, &self.classifier) {
                        continue;
                    }
                    // A strong run may close the buffer
                    if !run.is_followed_by_break() && run.next_char.is_some() {
                        continue;
                    }
                    needs_lookahead(text, run, &self.rules)
                }
                SeparatorClass::Weak => {
                    if !self.config.quick_yield_all()
                        || !is_usable_weak(text, 0, run, &self.rules)
                        || !run.is_followed_by_break()
                    {
                        continue;
                    }
                    true
                }
                _ => continue,
            };
            // Ambiguous runs wait for the next word
            if lookahead && !run.has_line_break && lead_char(text, run.end).is_none() {
                continue;
            }
            if text[..run.end].trim().chars().count() < min_chars {
                continue;
            }
            return Some((self.surfaced + run.end, run.is_strong()));
        }

        if self.emitted == 0 && !self.config.strict_punctuation_mode {
            if let Some(words) = self.config.force_first_fragment_after_words {
                return self
                    .word_cut(text, words, min_chars)
                    .map(|cut| (self.surfaced + cut, false));
            }
        }
        None
    }

    /// Whitespace right after the `words`-th word, once the next word began
    fn word_cut(&self, text: &str, words: usize, min_chars: usize) -> Option<usize> {
        let mut seen = 0;
        let mut in_word = false;

        for (pos, ch) in text.char_indices() {
            if ch.is_whitespace() {
                if in_word {
                    seen += 1;
                    in_word = false;
                    if seen >= words
                        && !text[pos..].trim_start().is_empty()
                        && text[..pos].trim().chars().count() >= min_chars
                    {
                        return Some(pos);
                    }
                }
            } else {
                in_word = true;
            }
        }
        None
    }

    fn emit_range(&mut self, from: usize, end: usize) {
        if let Some(sentence) = self.finish_sentence(&self.buffer[from..end]) {
            self.push_ready(sentence);
        }
    }

    /// Below the minimum length for the next emitted sentence
    fn is_short(&self, raw: &str) -> bool {
        let min = if self.emitted == 0 {
            self.config.minimum_first_fragment_length
        } else {
            self.config.minimum_sentence_length
        };
        raw.trim().chars().count() < min
    }

    /// Drop `buffer[..upto]`
    fn consume(&mut self, upto: usize) {
        if upto == 0 {
            return;
        }
        self.buffer.drain(..upto);
        self.surfaced = self.surfaced.saturating_sub(upto);
        self.held = self.held.saturating_sub(upto);
    }

    fn finish_sentence(&self, raw: &str) -> Option<String> {
        let mut text = self.poetic.render(raw);
        if self.config.cleanup_text_emojis {
            let cleaned = strip_emojis(&text);
            if cleaned != text.as_str() {
                text = self.poetic.render(&cleaned);
            }
        }
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn push_ready(&mut self, sentence: String) {
        if self.config.debug {
            log::debug!("sentence #{}: {sentence:?}", self.emitted + 1);
        }
        self.emitted += 1;
        self.ready.push_back(sentence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentflow_core::TokenizerKind;

    fn accumulator(config: EngineConfig) -> StreamAccumulator {
        StreamAccumulator::new(config, Arc::new(TokenizerPool::lazy())).unwrap()
    }

    fn drain(acc: &mut StreamAccumulator) -> Vec<String> {
        std::iter::from_fn(|| acc.pop()).collect()
    }

    #[test]
    fn test_state_transitions() {
        let mut acc = accumulator(EngineConfig::default());
        assert_eq!(acc.state(), AccumulatorState::Idle);

        acc.push("Пр").unwrap();
        assert_eq!(acc.state(), AccumulatorState::Accumulating);

        acc.finish().unwrap();
        assert_eq!(acc.state(), AccumulatorState::Done);
        assert_eq!(drain(&mut acc), vec!["Пр"]);
        assert_eq!(acc.buffered_chars(), 0);
    }

    #[test]
    fn test_closed_engine_rejects_input() {
        let mut acc = accumulator(EngineConfig::default());
        acc.finish().unwrap();
        assert!(matches!(acc.push("x"), Err(EngineError::EngineClosed)));
        assert!(matches!(acc.finish(), Err(EngineError::EngineClosed)));

        let mut acc = accumulator(EngineConfig::default());
        acc.push("Текст").unwrap();
        acc.close();
        assert!(matches!(acc.push("x"), Err(EngineError::EngineClosed)));
    }

    #[test]
    fn test_interval_flush() {
        let mut acc = accumulator(EngineConfig::default());
        acc.push("Это первое предложение. А вот второе! И третье, ").unwrap();
        assert_eq!(drain(&mut acc), vec!["Это первое предложение."]);
        assert_eq!(acc.buffered_chars(), " А вот второе! И третье, ".chars().count());
    }

    #[test]
    fn test_no_flush_below_interval() {
        let config = EngineConfig::builder().tokenization_interval(1000).build().unwrap();
        let mut acc = accumulator(config);
        acc.push("Это первое предложение. А вот второе предложение тут. ").unwrap();
        assert!(acc.pop().is_none());
        acc.finish().unwrap();
        assert_eq!(
            drain(&mut acc),
            vec!["Это первое предложение.", "А вот второе предложение тут."]
        );
    }

    #[test]
    fn test_quick_yield_single_fragment() {
        let config = EngineConfig::builder()
            .quick_yield_single_sentence_fragment(true)
            .tokenization_interval(1000)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        acc.push("Привет, как ").unwrap();
        // Weak separators do not count without quick_yield_for_all_sentences
        assert!(acc.pop().is_none());

        acc.push("дела? Всё хорошо. Да").unwrap();
        assert_eq!(drain(&mut acc), vec!["Привет, как дела?"]);

        acc.finish().unwrap();
        assert_eq!(drain(&mut acc), vec!["Всё хорошо. Да"]);
    }

    #[test]
    fn test_quick_yield_at_end_of_chunk() {
        let config = EngineConfig::builder()
            .quick_yield_single_sentence_fragment(true)
            .tokenization_interval(1000)
            .build()
            .unwrap();

        let mut acc = accumulator(config.clone());
        acc.push("Это первое предложение.").unwrap();
        assert_eq!(drain(&mut acc), vec!["Это первое предложение."]);

        let mut acc = accumulator(config);
        acc.push("Привет, как дела?").unwrap();
        assert_eq!(drain(&mut acc), vec!["Привет, как дела?"]);
    }

    #[test]
    fn test_quick_yield_waits_after_abbreviation() {
        let config = EngineConfig::builder()
            .quick_yield_single_sentence_fragment(true)
            .tokenization_interval(1000)
            .build()
            .unwrap();
        let mut acc = accumulator(config.clone());

        acc.push("Фрукты, т.е. ").unwrap();
        assert!(acc.pop().is_none());
        acc.push("яблоки и груши. ").unwrap();
        assert_eq!(drain(&mut acc), vec!["Фрукты, т.е. яблоки и груши."]);

        // "3." may still turn into a decimal number
        let mut acc = accumulator(config);
        acc.push("Число равно 3.").unwrap();
        assert!(acc.pop().is_none());
        acc.push("14 точно. ").unwrap();
        assert_eq!(drain(&mut acc), vec!["Число равно 3.14 точно."]);
    }

    #[test]
    fn test_quick_yield_for_all_one_fragment_per_sentence() {
        let config = EngineConfig::builder()
            .quick_yield_for_all_sentences(true)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        for chunk in [
            "Сначала мы гуляли, потом читали книги, затем обедали дома. Вечером смотрели",
            " фильм, потом ",
            "спали. Конец",
        ] {
            acc.push(chunk).unwrap();
        }
        acc.finish().unwrap();

        assert_eq!(
            drain(&mut acc),
            vec![
                "Сначала мы гуляли,",
                "потом читали книги, затем обедали дома.",
                "Вечером смотрели фильм,",
                "потом спали.",
                "Конец",
            ]
        );
    }

    #[test]
    fn test_quick_yield_every_fragment() {
        let config = EngineConfig::builder()
            .quick_yield_every_fragment(true)
            .tokenization_interval(1000)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        acc.push("Сначала мы гуляли, потом читали книги, затем обедали дома. Вечером смотрели фильм, потом спали. Конец")
            .unwrap();
        acc.finish().unwrap();

        assert_eq!(
            drain(&mut acc),
            vec![
                "Сначала мы гуляли,",
                "потом читали книги,",
                "затем обедали дома.",
                "Вечером смотрели фильм,",
                "потом спали.",
                "Конец",
            ]
        );
    }

    #[test]
    fn test_short_rest_after_fragment_merges_forward() {
        let config = EngineConfig::builder()
            .quick_yield_for_all_sentences(true)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        acc.push("Сначала мы долго гуляли").unwrap();
        acc.push(", да. Потом мы вернулись домой и отдохнули. ").unwrap();
        acc.push("Конец истории тут.").unwrap();
        acc.finish().unwrap();

        assert_eq!(
            drain(&mut acc),
            vec![
                "Сначала мы долго гуляли,",
                "да. Потом мы вернулись домой и отдохнули.",
                "Конец истории тут.",
            ]
        );
    }

    #[test]
    fn test_recover_keeps_held_sentence() {
        let config = EngineConfig::builder()
            .quick_yield_for_all_sentences(true)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        acc.push("Сначала мы долго гуляли").unwrap();
        acc.push(", да. Потом мы вернулись домой").unwrap();
        acc.recover();

        assert_eq!(drain(&mut acc), vec!["Сначала мы долго гуляли,", "да."]);
        assert_eq!(acc.state(), AccumulatorState::Done);
    }

    #[test]
    fn test_confirmed_flush_skips_surfaced_text() {
        let config = EngineConfig::builder()
            .quick_yield_for_all_sentences(true)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        acc.push("Это первое предложение, без сомнения. ").unwrap();
        acc.push("Потом второе предложение идёт.").unwrap();
        acc.finish().unwrap();

        let out = drain(&mut acc);
        assert_eq!(
            out.join(" "),
            "Это первое предложение, без сомнения. Потом второе предложение идёт."
        );
    }

    #[test]
    fn test_forced_flush_bounds_buffer() {
        let config = EngineConfig::builder()
            .max_buffer_size(40)
            .tokenization_interval(1000)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        for _ in 0..10 {
            acc.push("слово слово ").unwrap();
            assert!(acc.buffered_chars() <= 40);
        }
        acc.finish().unwrap();

        let out = drain(&mut acc);
        assert!(out.len() > 1);
        assert_eq!(out.join(" "), "слово слово ".repeat(10).trim());
    }

    #[test]
    fn test_forced_flush_hard_cut_in_strict_mode() {
        let config = EngineConfig::builder()
            .max_buffer_size(30)
            .strict_punctuation_mode(true)
            .tokenization_interval(1000)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        acc.push(&"а".repeat(31)).unwrap();
        assert_eq!(drain(&mut acc), vec!["а".repeat(15)]);
        assert_eq!(acc.buffered_chars(), 16);
    }

    #[test]
    fn test_forced_cut_skips_whitespace_runs() {
        let config = EngineConfig::builder()
            .max_buffer_size(30)
            .tokenization_interval(1000)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        // Whitespace from char 14 on; a cut there would leave 14 chars
        acc.push(&format!("{}{}{}", "б".repeat(14), " ".repeat(4), "в".repeat(13))).unwrap();
        for sentence in drain(&mut acc) {
            assert!(sentence.chars().count() >= 15, "short cut {sentence:?}");
        }
        assert!(acc.buffered_chars() <= 30);
    }

    #[test]
    fn test_force_first_fragment_after_words() {
        let config = EngineConfig::builder()
            .quick_yield_single_sentence_fragment(true)
            .force_first_fragment_after_words(Some(3))
            .tokenization_interval(1000)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        acc.push("один два три").unwrap();
        assert!(acc.pop().is_none());
        acc.push(" четыре пять").unwrap();
        assert_eq!(drain(&mut acc), vec!["один два три"]);
    }

    #[test]
    fn test_filter_leading_non_alphanumeric() {
        let config = EngineConfig::builder()
            .filter_leading_non_alphanumeric(true)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        acc.push("** ").unwrap();
        acc.push("- «Привет» - сказал он.").unwrap();
        acc.finish().unwrap();
        assert_eq!(drain(&mut acc), vec!["«Привет» - сказал он."]);
    }

    #[test]
    fn test_poetic_preserve() {
        let config = EngineConfig::builder()
            .poetic_mode(true)
            .preserve_line_breaks(true)
            .build()
            .unwrap();
        let mut acc = accumulator(config);

        acc.push("Строка один\nСтрока два.").unwrap();
        acc.finish().unwrap();
        assert_eq!(drain(&mut acc), vec!["Строка один\n", "Строка два."]);
    }

    #[test]
    fn test_emoji_cleanup() {
        let config = EngineConfig::builder().cleanup_text_emojis(true).build().unwrap();
        let mut acc = accumulator(config);

        acc.push("Привет 👋 всем друзьям! 🎉").unwrap();
        acc.finish().unwrap();
        assert_eq!(drain(&mut acc), vec!["Привет всем друзьям!"]);
    }

    #[test]
    fn test_teardown_fails_later_flush() {
        let pool = Arc::new(TokenizerPool::new());
        pool.init_tokenizer(TokenizerKind::RuleBased, "ru", false, false).unwrap();
        let config = EngineConfig::builder()
            .tokenizer(TokenizerKind::RuleBased)
            .build()
            .unwrap();
        let mut acc = StreamAccumulator::new(config, Arc::clone(&pool)).unwrap();

        acc.push("Это первое предложение. А вот второе! И третье, ").unwrap();
        assert_eq!(acc.pop().as_deref(), Some("Это первое предложение."));

        pool.teardown(TokenizerKind::RuleBased, "ru");
        let err = acc.push("которое продолжается.").unwrap_err();
        assert!(matches!(err, EngineError::UninitializedTokenizer { .. }));
        assert!(acc.pop().is_none());
    }

    #[test]
    fn test_strict_pool_fails_fast() {
        let err = StreamAccumulator::new(EngineConfig::default(), Arc::new(TokenizerPool::new()))
            .unwrap_err();
        assert!(matches!(err, EngineError::UninitializedTokenizer { .. }));
    }
}
