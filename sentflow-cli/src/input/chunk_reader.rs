//! Fixed-size chunked reading with UTF-8-safe splitting
//!
//! Files and stdin are fed to the engine in small byte chunks, the way a
//! language model delivers tokens. A multi-byte character cut by a chunk
//! boundary is carried over to the next chunk.

use std::io::{self, Read};

use crate::error::CliError;

/// Iterator of UTF-8 chunks over a reader
pub struct ChunkReader<R> {
    reader: R,
    chunk_bytes: usize,
    name: String,
    /// Bytes of a character split by the previous read
    carry: Vec<u8>,
    done: bool,
}

impl<R: Read> ChunkReader<R> {
    /// Read `chunk_bytes` at a time; `name` labels encoding errors
    pub fn new(reader: R, chunk_bytes: usize, name: impl Into<String>) -> Self {
        Self {
            reader,
            chunk_bytes: chunk_bytes.max(1),
            name: name.into(),
            carry: Vec::new(),
            done: false,
        }
    }

    fn invalid(&self) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, CliError::InvalidEncoding(self.name.clone()))
    }

    fn read_chunk(&mut self) -> io::Result<Option<String>> {
        let mut bytes = std::mem::take(&mut self.carry);
        let start = bytes.len();
        bytes.resize(start + self.chunk_bytes, 0);

        let n = loop {
            match self.reader.read(&mut bytes[start..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        bytes.truncate(start + n);

        if n == 0 {
            self.done = true;
            if bytes.is_empty() {
                return Ok(None);
            }
            // Input ended inside a character
            return Err(self.invalid());
        }

        match std::str::from_utf8(&bytes) {
            Ok(_) => {}
            Err(e) if e.error_len().is_none() => {
                self.carry = bytes.split_off(e.valid_up_to());
            }
            Err(_) => return Err(self.invalid()),
        }

        match String::from_utf8(bytes) {
            Ok(text) => Ok(Some(text)),
            Err(_) => Err(self.invalid()),
        }
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.read_chunk() {
                Ok(Some(text)) if text.is_empty() => continue,
                Ok(Some(text)) => return Some(Ok(text)),
                Ok(None) => return None,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(input: &[u8], size: usize) -> Vec<io::Result<String>> {
        ChunkReader::new(input, size, "test").collect()
    }

    #[test]
    fn test_ascii_chunks() {
        let out: Vec<String> = chunks(b"abcdefg", 3).into_iter().map(|c| c.unwrap()).collect();
        assert_eq!(out, vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_multibyte_split_is_carried() {
        let text = "Привет, мир! 👋";
        for size in 1..8 {
            let out: Vec<String> = chunks(text.as_bytes(), size)
                .into_iter()
                .map(|c| c.unwrap())
                .collect();
            assert_eq!(out.concat(), text, "chunk size {size}");
            assert!(out.iter().all(|c| !c.is_empty()));
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let out = chunks(&[b'a', 0xff, b'b'], 4);
        assert_eq!(out.len(), 1);
        let err = out.into_iter().next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn test_truncated_character_at_end() {
        let bytes = "ж".as_bytes();
        let out = chunks(&bytes[..1], 4);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(chunks(b"", 4).is_empty());
    }
}
