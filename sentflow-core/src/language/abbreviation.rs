//! Abbreviation trie for backward lookup at a period
//!
//! Nodes live in one contiguous vector and are addressed by index.
//! Matching is case-insensitive.

use std::collections::HashMap;

/// How an abbreviation affects a following boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbbreviationKind {
    /// Precedes a name ("Dr.", "проф."); never ends a sentence
    Title,
    /// Ordinary abbreviation ("etc.", "т.е."); ends a sentence only before
    /// a capitalised word
    Common,
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<char, u32>,
    kind: Option<AbbreviationKind>,
}

/// Case-insensitive abbreviation trie
#[derive(Debug, Clone)]
pub struct AbbreviationTrie {
    nodes: Vec<TrieNode>,
}

impl Default for AbbreviationTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl AbbreviationTrie {
    /// Create empty trie
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Build from configuration categories
    pub fn from_categories(categories: &HashMap<String, Vec<String>>) -> Self {
        let mut trie = Self::new();

        for (category, abbreviations) in categories {
            let kind = if category == "titles" {
                AbbreviationKind::Title
            } else {
                AbbreviationKind::Common
            };

            for abbr in abbreviations {
                let abbr = abbr.trim_end_matches('.');
                trie.insert(abbr, kind);

                // "т.е" also matches at its inner dot
                let parts: Vec<&str> = abbr.split('.').collect();
                for i in 1..parts.len() {
                    let prefix = parts[..i].join(".");
                    if !prefix.is_empty() && trie.lookup(&prefix).is_none() {
                        trie.insert(&prefix, AbbreviationKind::Common);
                    }
                }
            }
        }

        trie
    }

    /// Insert abbreviation (without its final period)
    pub fn insert(&mut self, abbreviation: &str, kind: AbbreviationKind) {
        let mut current = 0usize;

        for ch in abbreviation.chars().flat_map(char::to_lowercase) {
            current = match self.nodes[current].children.get(&ch) {
                Some(&idx) => idx as usize,
                None => {
                    let idx = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children.insert(ch, idx as u32);
                    idx
                }
            };
        }

        let node = &mut self.nodes[current];
        // Title wins when the same spelling appears in two categories
        if node.kind != Some(AbbreviationKind::Title) {
            node.kind = Some(kind);
        }
    }

    /// Look up a token (without its final period)
    pub fn lookup(&self, token: &str) -> Option<AbbreviationKind> {
        if token.is_empty() {
            return None;
        }

        let mut current = 0usize;
        for ch in token.chars().flat_map(char::to_lowercase) {
            current = *self.nodes[current].children.get(&ch)? as usize;
        }
        self.nodes[current].kind
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.kind.is_some()).count()
    }

    /// Check if trie is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
