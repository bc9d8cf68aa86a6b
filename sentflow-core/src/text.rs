//! Text cleanup for finalized sentences

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

static EMOJI: OnceLock<Regex> = OnceLock::new();
static SPACE_RUNS: OnceLock<Regex> = OnceLock::new();

fn emoji_regex() -> &'static Regex {
    EMOJI.get_or_init(|| {
        // Pictographs, skin tone modifiers, ZWJ, VS16, keycap, regional indicators
        Regex::new(r"[\p{Extended_Pictographic}\x{1F3FB}-\x{1F3FF}\x{200D}\x{FE0F}\x{20E3}\x{1F1E6}-\x{1F1FF}]")
            .expect("emoji pattern is valid")
    })
}

fn space_runs_regex() -> &'static Regex {
    SPACE_RUNS.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("space pattern is valid"))
}

/// Remove emoji code points, collapsing the spaces they leave behind
pub fn strip_emojis(text: &str) -> Cow<'_, str> {
    match emoji_regex().replace_all(text, "") {
        Cow::Borrowed(_) => Cow::Borrowed(text),
        Cow::Owned(owned) => Cow::Owned(space_runs_regex().replace_all(&owned, " ").into_owned()),
    }
}

/// Whether `ch` may open a sentence: alphanumeric, quote or bracket
pub fn is_sentence_opener(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '"' | '\'' | '«' | '„' | '“' | '(' | '[' | '{')
}
