//! JSON Lines output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - one object per sentence, one per line
pub struct JsonFormatter<W: Write> {
    writer: W,
    index: usize,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceData {
    /// Position of the sentence in the output
    pub index: usize,
    /// Input the sentence came from
    pub source: String,
    /// The sentence text
    pub text: String,
    /// Length in characters
    pub chars: usize,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self { writer, index: 0 }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, sentence: &str, source: &str) -> Result<()> {
        let data = SentenceData {
            index: self.index,
            source: source.to_string(),
            text: sentence.to_string(),
            chars: sentence.chars().count(),
        };
        serde_json::to_writer(&mut self.writer, &data)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        self.index += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
