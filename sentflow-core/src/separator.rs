//! Separator classification with O(1) lookup
//!
//! Every character of the stream is classified as a strong separator
//! (sentence end), a weak separator (clause break), an ignorable mark
//! (quote or bracket) or nothing at all. The symbol sets come from the
//! language data; ASCII characters take a direct table lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Category of a boundary candidate character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeparatorClass {
    /// Sentence-ending punctuation, long pause
    Strong,
    /// Clause-separating punctuation, short pause
    Weak,
    /// Quotes and brackets, never a boundary on their own
    Ignorable,
    /// Anything else
    #[default]
    None,
}

impl SeparatorClass {
    /// Strong or weak
    #[inline]
    pub fn is_separator(self) -> bool {
        matches!(self, SeparatorClass::Strong | SeparatorClass::Weak)
    }
}

impl fmt::Display for SeparatorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeparatorClass::Strong => "strong",
            SeparatorClass::Weak => "weak",
            SeparatorClass::Ignorable => "ignorable",
            SeparatorClass::None => "none",
        };
        f.write_str(name)
    }
}

/// Lookup table for one language's separator sets
#[derive(Debug, Clone)]
pub struct SeparatorTable {
    /// ASCII lookup table for chars 0-127
    ascii_table: [SeparatorClass; 128],
    /// Non-ASCII separators (guillemets, ellipsis, dashes)
    non_ascii: HashMap<char, SeparatorClass>,
}

impl SeparatorTable {
    /// Build from the three symbol sets
    ///
    /// A character listed in several sets keeps the strongest class.
    pub fn new(strong: &[char], weak: &[char], ignorable: &[char]) -> Self {
        let mut table = Self {
            ascii_table: [SeparatorClass::None; 128],
            non_ascii: HashMap::new(),
        };

        for &ch in ignorable {
            table.insert(ch, SeparatorClass::Ignorable);
        }
        for &ch in weak {
            table.insert(ch, SeparatorClass::Weak);
        }
        for &ch in strong {
            table.insert(ch, SeparatorClass::Strong);
        }

        table
    }

    fn insert(&mut self, ch: char, class: SeparatorClass) {
        if ch.is_ascii() {
            self.ascii_table[ch as usize] = class;
        } else {
            self.non_ascii.insert(ch, class);
        }
    }

    /// Look up a character - hot path
    #[inline]
    pub fn lookup(&self, ch: char) -> SeparatorClass {
        if ch.is_ascii() {
            self.ascii_table[ch as usize]
        } else {
            self.non_ascii
                .get(&ch)
                .copied()
                .unwrap_or(SeparatorClass::None)
        }
    }
}

/// Classifier used by the segmenters, heuristics and the accumulator
///
/// Wraps a language table and optionally promotes line feeds to strong
/// separators (poetic mode).
#[derive(Debug, Clone)]
pub struct SeparatorClassifier {
    table: Arc<SeparatorTable>,
    line_breaks_strong: bool,
}

impl SeparatorClassifier {
    /// Create a classifier over a language table
    pub fn new(table: Arc<SeparatorTable>) -> Self {
        Self {
            table,
            line_breaks_strong: false,
        }
    }

    /// Treat `\n` as a strong separator
    pub fn with_line_breaks_strong(mut self, enabled: bool) -> Self {
        self.line_breaks_strong = enabled;
        self
    }

    /// Whether line feeds are strong separators
    pub fn line_breaks_strong(&self) -> bool {
        self.line_breaks_strong
    }

    /// Classify a single character
    #[inline]
    pub fn classify(&self, ch: char) -> SeparatorClass {
        if ch == '\n' && self.line_breaks_strong {
            return SeparatorClass::Strong;
        }
        self.table.lookup(ch)
    }

    #[inline]
    pub fn is_strong(&self, ch: char) -> bool {
        self.classify(ch) == SeparatorClass::Strong
    }

    #[inline]
    pub fn is_weak(&self, ch: char) -> bool {
        self.classify(ch) == SeparatorClass::Weak
    }

    #[inline]
    pub fn is_ignorable(&self, ch: char) -> bool {
        self.classify(ch) == SeparatorClass::Ignorable
    }

    /// Whether `text`, ignoring trailing whitespace and quotes/brackets,
    /// ends with a strong separator
    pub fn ends_strong(&self, text: &str) -> bool {
        text.chars()
            .rev()
            .find(|&c| {
                let class = self.classify(c);
                class == SeparatorClass::Strong
                    || !(c.is_whitespace() || class == SeparatorClass::Ignorable)
            })
            .map(|c| self.is_strong(c))
            .unwrap_or(false)
    }
}
