//! Boundary heuristics
//!
//! Post-processing applied to raw separator runs and tokenizer boundaries:
//! abbreviation and decimal demotion, the short-fragment comma rule and
//! minimum-length merging.

use crate::language::{AbbreviationKind, LanguageRules};
use crate::segment::candidates::{next_alpha, token_before, SeparatorRun};
use crate::separator::SeparatorClassifier;

/// Fragments before a weak separator must be at least this long
const MIN_WEAK_FRAGMENT_CHARS: usize = 4;

/// Whether a period run is a decimal point or an abbreviation rather than
/// a sentence end
pub fn suppresses_boundary(
    text: &str,
    run: &SeparatorRun,
    rules: &LanguageRules,
    classifier: &SeparatorClassifier,
) -> bool {
    if run.is_decimal(text) {
        return true;
    }
    if !run.only_periods || run.has_line_break {
        return false;
    }

    let token = token_before(text, run.start);
    let continues_lowercase = next_alpha(text, run.end, classifier).is_some_and(char::is_lowercase);

    match rules.abbreviation(token) {
        Some(AbbreviationKind::Title) => true,
        Some(AbbreviationKind::Common) => continues_lowercase,
        None => continues_lowercase && is_short_alpha(token, rules.abbreviation_max_len()),
    }
}

/// Whether [`suppresses_boundary`] needs text past `run` to decide
///
/// Only period runs after an abbreviation or a short word depend on the
/// next word; a period right after a digit at the end of `text` may still
/// become a decimal point.
pub fn needs_lookahead(text: &str, run: &SeparatorRun, rules: &LanguageRules) -> bool {
    if !run.only_periods || run.has_line_break {
        return false;
    }
    let token = token_before(text, run.start);
    if run.next_char.is_none() && token.chars().next_back().is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }
    matches!(rules.abbreviation(token), Some(AbbreviationKind::Common))
        || is_short_alpha(token, rules.abbreviation_max_len())
}

/// Alphabetic token of at most `max_len` letters
pub fn is_short_alpha(token: &str, max_len: usize) -> bool {
    !token.is_empty()
        && token.chars().all(char::is_alphabetic)
        && token.chars().count() <= max_len
}

/// Short-fragment comma rule
///
/// A weak separator only qualifies as a fragment end when the fragment
/// since `from` is long enough and does not end in a short connector word.
pub fn is_usable_weak(text: &str, from: usize, run: &SeparatorRun, rules: &LanguageRules) -> bool {
    let fragment = text[from..run.start].trim();
    if fragment.chars().count() < MIN_WEAK_FRAGMENT_CHARS {
        return false;
    }
    let last_word = fragment.rsplit(char::is_whitespace).next().unwrap_or(fragment);
    last_word.chars().count() > rules.short_token_length()
}

/// Minimum length thresholds for one flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthPolicy {
    /// Threshold for every sentence but the first of the stream
    pub minimum_sentence_length: usize,
    /// Threshold for the first sentence of the stream
    pub minimum_first_fragment_length: usize,
    /// Nothing has been emitted yet
    pub first_sentence: bool,
}

impl LengthPolicy {
    /// Policy that accepts every boundary
    pub const UNBOUNDED: LengthPolicy = LengthPolicy {
        minimum_sentence_length: 0,
        minimum_first_fragment_length: 0,
        first_sentence: false,
    };
}

/// Merge short candidates forward
///
/// A boundary is kept only when the trimmed text since the previously kept
/// boundary reaches the applicable threshold. Rejected boundaries merge
/// their sentence into the next one.
pub fn enforce_minimum_length(text: &str, boundaries: &[usize], policy: LengthPolicy) -> Vec<usize> {
    let mut accepted = Vec::with_capacity(boundaries.len());
    let mut prev = 0;
    let mut first = policy.first_sentence;

    for &boundary in boundaries {
        if boundary <= prev {
            continue;
        }
        let threshold = if first {
            policy.minimum_first_fragment_length
        } else {
            policy.minimum_sentence_length
        };
        let length = text[prev..boundary].trim().chars().count();
        if length > 0 && length >= threshold {
            accepted.push(boundary);
            prev = boundary;
            first = false;
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::get_rules;
    use crate::segment::candidates::scan_runs;

    /// Whether the strong run starting right after `prefix` is suppressed
    fn suppressed(lang: &str, text: &str, prefix: &str) -> bool {
        let rules = get_rules(lang).unwrap();
        let classifier = rules.classifier(false);
        let runs = scan_runs(text, &classifier);
        let run = runs.iter().find(|r| r.start == prefix.len()).unwrap();
        suppresses_boundary(text, run, &rules, &classifier)
    }

    #[test]
    fn test_abbreviation_before_lowercase() {
        assert!(suppressed("ru", "Фрукты, т.е. яблоки", "Фрукты, т.е"));
        assert!(suppressed("en", "Apples etc. and pears", "Apples etc"));
        // Capitalised continuation still splits after a common abbreviation
        assert!(!suppressed("en", "Apples etc. The end", "Apples etc"));
    }

    #[test]
    fn test_title_abbreviation_always_suppressed() {
        assert!(suppressed("en", "Ask Dr. Smith", "Ask Dr"));
        assert!(suppressed("ru", "Живёт в г. Москва", "Живёт в г"));
    }

    #[test]
    fn test_short_token_rule() {
        // Unknown two-letter token before lowercase
        assert!(suppressed("ru", "Это жж. конечно", "Это жж"));
        // Regular word before lowercase is left to the backend
        assert!(!suppressed("ru", "Это слово. конечно", "Это слово"));
    }

    #[test]
    fn test_emphatic_runs_not_suppressed() {
        assert!(!suppressed("ru", "Это т.е! правда", "Это т.е"));
    }

    #[test]
    fn test_decimal_suppressed() {
        assert!(suppressed("ru", "Число 3.14 велико.", "Число 3"));
        assert!(!suppressed("ru", "Число 3.14 велико.", "Число 3.14 велико"));
    }

    #[test]
    fn test_lookahead_only_for_ambiguous_periods() {
        let rules = get_rules("ru").unwrap();
        let classifier = rules.classifier(false);
        let needs = |text: &str| {
            let runs = scan_runs(text, &classifier);
            needs_lookahead(text, runs.last().unwrap(), &rules)
        };

        assert!(!needs("Это первое предложение."));
        assert!(!needs("Как дела?"));
        assert!(needs("Фрукты, т.е."));
        assert!(needs("Это жж."));
        assert!(needs("Число 3."));
        // A digit before a period that is already followed by a space
        assert!(!needs("Глава 3. "));
    }

    #[test]
    fn test_comma_rule() {
        let rules = get_rules("ru").unwrap();
        let classifier = rules.classifier(false);

        let text = "Но, и так далее, конечно";
        let runs = scan_runs(text, &classifier);
        // "Но" is too short
        assert!(!is_usable_weak(text, 0, &runs[0], &rules));
        // "далее" is long enough
        assert!(is_usable_weak(text, 0, &runs[1], &rules));
        // Starting after the first comma leaves "и так далее"
        assert!(is_usable_weak(text, runs[0].end, &runs[1], &rules));

        let text = "Мы пошли в парк и, ";
        let runs = scan_runs(text, &classifier);
        assert!(!is_usable_weak(text, 0, &runs[0], &rules));
    }

    #[test]
    fn test_minimum_length_merges_forward() {
        let text = "Да. Нет. Это длинное предложение. Ок.";
        let bounds: Vec<usize> = ["Да.", "Нет.", "предложение.", "Ок."]
            .iter()
            .map(|s| text.find(s).unwrap() + s.len())
            .collect();
        let policy = LengthPolicy {
            minimum_sentence_length: 12,
            minimum_first_fragment_length: 8,
            first_sentence: true,
        };

        let accepted = enforce_minimum_length(text, &bounds, policy);
        // "Да. Нет." is 8 chars and opens the stream
        assert_eq!(accepted, vec![bounds[1], bounds[2]]);
    }

    #[test]
    fn test_minimum_length_after_first() {
        let text = "Да. Нет. Это длинное предложение.";
        let bounds = vec![5, text.find("Нет.").unwrap() + "Нет.".len(), text.len()];
        let policy = LengthPolicy {
            minimum_sentence_length: 12,
            minimum_first_fragment_length: 8,
            first_sentence: false,
        };

        let accepted = enforce_minimum_length(text, &bounds, policy);
        assert_eq!(accepted, vec![text.len()]);
    }

    #[test]
    fn test_unbounded_policy() {
        let text = "А. Б. В.";
        let bounds = vec![3, 7, text.len()];
        assert_eq!(enforce_minimum_length(text, &bounds, LengthPolicy::UNBOUNDED), bounds);
    }
}
