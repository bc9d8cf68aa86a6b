//! Separator runs and the character context around them

use smallvec::SmallVec;

use crate::separator::{SeparatorClass, SeparatorClassifier};

/// Runs found in one flush; most buffers hold only a handful
pub type Runs = SmallVec<[SeparatorRun; 8]>;

/// A maximal run of same-class separators plus adjacent closing quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorRun {
    /// Byte offset of the first separator
    pub start: usize,
    /// Byte offset right after the run (and its closers); the candidate
    /// boundary position
    pub end: usize,
    /// Strong or Weak
    pub class: SeparatorClass,
    /// Every separator in the run is `.`
    pub only_periods: bool,
    /// Run contains a promoted line feed
    pub has_line_break: bool,
    /// Run contains `!`, `?` or another non-period terminal
    pub emphatic: bool,
    /// First character after the run, if any
    pub next_char: Option<char>,
}

impl SeparatorRun {
    #[inline]
    pub fn is_strong(&self) -> bool {
        self.class == SeparatorClass::Strong
    }

    /// Followed by whitespace (or by anything, for line-break runs)
    pub fn is_followed_by_break(&self) -> bool {
        self.has_line_break || self.next_char.is_some_and(char::is_whitespace)
    }

    /// `3.14`: a lone period between digits
    pub fn is_decimal(&self, text: &str) -> bool {
        self.only_periods
            && self.end - self.start == 1
            && text[..self.start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_digit())
            && self.next_char.is_some_and(|c| c.is_ascii_digit())
    }
}

/// Scan `text` for Strong and Weak separator runs
pub fn scan_runs(text: &str, classifier: &SeparatorClassifier) -> Runs {
    let mut runs = Runs::new();
    let mut iter = text.char_indices().peekable();

    while let Some((start, ch)) = iter.next() {
        let class = classifier.classify(ch);
        if !class.is_separator() {
            continue;
        }

        let mut run = SeparatorRun {
            start,
            end: start + ch.len_utf8(),
            class,
            only_periods: ch == '.',
            has_line_break: ch == '\n',
            emphatic: is_emphatic(ch, class),
            next_char: None,
        };

        while let Some(&(pos, next)) = iter.peek() {
            if classifier.classify(next) != class {
                break;
            }
            run.only_periods &= next == '.';
            run.has_line_break |= next == '\n';
            run.emphatic |= is_emphatic(next, class);
            run.end = pos + next.len_utf8();
            iter.next();
        }

        // Closing quotes belong to the sentence, opening ones after a line
        // break to the next
        if !text[..run.end].ends_with('\n') {
            while let Some(&(pos, next)) = iter.peek() {
                if !classifier.is_ignorable(next) {
                    break;
                }
                run.end = pos + next.len_utf8();
                iter.next();
            }
        }

        run.next_char = iter.peek().map(|&(_, c)| c);
        runs.push(run);
    }

    runs
}

fn is_emphatic(ch: char, class: SeparatorClass) -> bool {
    class == SeparatorClass::Strong && ch != '.' && ch != '\n'
}

/// Token right before `pos`: letters, digits and inner `.`/`-`
pub fn token_before(text: &str, pos: usize) -> &str {
    let head = &text[..pos];
    let start = head
        .char_indices()
        .rev()
        .take_while(|&(_, c)| c.is_alphanumeric() || c == '.' || c == '-')
        .last()
        .map_or(pos, |(i, _)| i);
    head[start..].trim_start_matches(['.', '-'])
}

/// First non-whitespace character at or after `pos`
pub fn lead_char(text: &str, pos: usize) -> Option<char> {
    text[pos..].chars().find(|c| !c.is_whitespace())
}

/// First alphanumeric character after `pos`, looking past whitespace,
/// quotes and dashes only
pub fn next_alpha(text: &str, pos: usize, classifier: &SeparatorClassifier) -> Option<char> {
    text[pos..]
        .chars()
        .find(|&c| {
            !(c.is_whitespace() || classifier.is_ignorable(c) || matches!(c, '-' | '–' | '—'))
        })
        .filter(|c| c.is_alphanumeric())
}

/// Number of characters in `text[pos..]`
#[inline]
pub fn chars_after(text: &str, pos: usize) -> usize {
    text[pos..].chars().count()
}
