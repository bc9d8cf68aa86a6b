//! Read-ahead guard for boundaries near the end of a partial buffer

use super::candidates::chars_after;
use super::SegmentContext;

/// Drop boundaries that lack enough read-ahead
///
/// For non-final text a boundary needs some non-whitespace text after it
/// and at least `context_size` characters of read-ahead. The read-ahead
/// requirement is waived when the text itself ends with a strong
/// separator. Final text is returned untouched.
pub fn apply_context_guard(text: &str, boundaries: Vec<usize>, ctx: &SegmentContext<'_>) -> Vec<usize> {
    if ctx.is_final {
        return boundaries;
    }

    let tail_is_strong = ctx.classifier.ends_strong(text);

    boundaries
        .into_iter()
        .filter(|&b| {
            if b >= text.len() || text[b..].trim().is_empty() {
                return false;
            }
            tail_is_strong || chars_after(text, b) >= ctx.context_size
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::LengthPolicy;
    use crate::language::get_rules;

    fn guard(text: &str, boundaries: Vec<usize>, is_final: bool) -> Vec<usize> {
        let classifier = get_rules("ru").unwrap().classifier(false);
        let ctx = SegmentContext {
            classifier: &classifier,
            context_size: 15,
            is_final,
            lengths: LengthPolicy::UNBOUNDED,
        };
        apply_context_guard(text, boundaries, &ctx)
    }

    #[test]
    fn test_short_read_ahead_dropped() {
        let text = "Первое. Второе, и";
        let b = "Первое.".len();
        assert!(guard(text, vec![b], false).is_empty());
        assert_eq!(guard(text, vec![b], true), vec![b]);
    }

    #[test]
    fn test_long_read_ahead_kept() {
        let text = "Первое. Второе предложение тут, и";
        let b = "Первое.".len();
        assert_eq!(guard(text, vec![b], false), vec![b]);
    }

    #[test]
    fn test_strong_tail_waives_read_ahead() {
        let text = "Первое. Второе!";
        let b = "Первое.".len();
        assert_eq!(guard(text, vec![b, text.len()], false), vec![b]);
    }

    #[test]
    fn test_whitespace_only_tail_dropped() {
        let text = "Первое.  ";
        let b = "Первое.".len();
        assert!(guard(text, vec![b], false).is_empty());
    }
}
