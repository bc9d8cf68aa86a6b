//! Property tests for the stream accumulator

use std::sync::Arc;

use proptest::prelude::*;
use sentflow_engine::*;

fn arb_text() -> impl Strategy<Value = String> {
    "[а-яА-Яa-z0-9 .,!?;:«»\n…—]{0,300}"
}

/// Cut `text` into chunks of the given character counts, cycling through them
fn chunked(text: &str, sizes: &[usize]) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut pos = 0;
    let mut i = 0;
    while pos < chars.len() {
        let end = (pos + sizes[i % sizes.len()]).min(chars.len());
        chunks.push(chars[pos..end].iter().collect());
        pos = end;
        i += 1;
    }
    chunks
}

fn visible(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

prop_compose! {
    fn arb_config()(
        rule_based in any::<bool>(),
        quick_single in any::<bool>(),
        quick_all in any::<bool>(),
        quick_every in any::<bool>(),
        poetic in any::<bool>(),
        preserve in any::<bool>(),
        strict in any::<bool>(),
        max_buffer_size in 30usize..200,
        tokenization_interval in 1usize..20,
        force_words in proptest::option::of(1usize..5),
    ) -> EngineConfig {
        EngineConfig::builder()
            .tokenizer(if rule_based { TokenizerKind::RuleBased } else { TokenizerKind::Neural })
            .quick_yield_single_sentence_fragment(quick_single)
            .quick_yield_for_all_sentences(quick_all)
            .quick_yield_every_fragment(quick_every)
            .poetic_mode(poetic)
            .preserve_line_breaks(preserve)
            .strict_punctuation_mode(strict)
            .max_buffer_size(max_buffer_size)
            .tokenization_interval(tokenization_interval)
            .force_first_fragment_after_words(force_words)
            .build()
            .unwrap()
    }
}

proptest! {
    #[test]
    fn prop_no_text_lost_or_duplicated(
        text in arb_text(),
        sizes in prop::collection::vec(1usize..25, 1..5),
        config in arb_config(),
    ) {
        let sentences: Vec<String> = generate_sentences(chunked(&text, &sizes), config)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        prop_assert_eq!(visible(&sentences.concat()), visible(&text));
        for sentence in &sentences {
            prop_assert!(!sentence.trim().is_empty());
        }
    }

    #[test]
    fn prop_buffer_stays_bounded(
        text in arb_text(),
        sizes in prop::collection::vec(1usize..40, 1..5),
        config in arb_config(),
    ) {
        let max = config.max_buffer_size;
        let mut acc = StreamAccumulator::new(config, Arc::new(TokenizerPool::lazy())).unwrap();

        for chunk in chunked(&text, &sizes) {
            acc.push(&chunk).unwrap();
            prop_assert!(acc.buffered_chars() <= max);
        }
        acc.finish().unwrap();
        prop_assert_eq!(acc.buffered_chars(), 0);
        prop_assert_eq!(acc.state(), AccumulatorState::Done);
    }

    #[test]
    fn prop_minimum_lengths_respected(
        text in arb_text(),
        sizes in prop::collection::vec(1usize..25, 1..5),
        config in arb_config(),
    ) {
        let first_min = config.minimum_first_fragment_length;
        let min = config.minimum_sentence_length;

        let sentences: Vec<String> = generate_sentences(chunked(&text, &sizes), config)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        // The last sentence is the drained remainder and may be short
        if sentences.len() > 1 {
            prop_assert!(sentences[0].chars().count() >= first_min);
            for sentence in &sentences[1..sentences.len() - 1] {
                prop_assert!(sentence.chars().count() >= min, "short sentence {:?}", sentence);
            }
        }
    }

    #[test]
    fn prop_chunking_does_not_change_sentences(
        text in "[а-яА-Я ]{1,20}(\\. [А-Я][а-я ]{12,30}){1,6}\\.",
        sizes in prop::collection::vec(1usize..25, 1..5),
    ) {
        let whole: Vec<String> = generate_sentences([text.as_str()], EngineConfig::default())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        let streamed: Vec<String> = generate_sentences(chunked(&text, &sizes), EngineConfig::default())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        prop_assert_eq!(whole, streamed);
    }
}
