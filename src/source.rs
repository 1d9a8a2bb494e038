// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! Decoded source buffers.
//!
//! A [`Source`] wraps the code points of one definition file together with a
//! path label and a line index, so that the lexer can scan it and the
//! diagnostic printer can quote it.

use thiserror::Error;

/// Errors that can occur while decoding input into a source buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The input was not valid UTF-8.
    #[error("Unicode error")]
    Unicode,
}

/// A decoded source buffer.
///
/// Lines are indexed starting at 1. Line slices never include the
/// terminating line feed; a carriage return immediately preceding a line
/// feed is elided as well.
#[derive(Debug, Clone)]
pub struct Source {
    data: Vec<char>,
    lines: Vec<(usize, usize)>,
    path: String,
}

impl Source {
    /// Creates a source buffer from an already decoded code point sequence.
    pub fn from_chars(data: Vec<char>, path: impl Into<String>) -> Self {
        let mut lines = Vec::new();
        let mut line_start = 0;

        for (i, &c) in data.iter().enumerate() {
            if c == '\n' {
                let mut line_end = i;
                if line_end > line_start && data[line_end - 1] == '\r' {
                    line_end -= 1;
                }
                lines.push((line_start, line_end));
                line_start = i + 1;
            }
        }

        // A file that does not end with a line feed still contributes a
        // final line, possibly empty.
        lines.push((line_start, data.len()));

        Self {
            data,
            lines,
            path: path.into(),
        }
    }

    /// Creates a source buffer by decoding a UTF-8 byte sequence.
    pub fn from_bytes(data: &[u8], path: impl Into<String>) -> Result<Self, SourceError> {
        let text = std::str::from_utf8(data).map_err(|_| SourceError::Unicode)?;
        Ok(Self::from_chars(text.chars().collect(), path))
    }

    /// Creates a source buffer from a string.
    pub fn from_text(text: &str, path: impl Into<String>) -> Self {
        Self::from_chars(text.chars().collect(), path)
    }

    /// Code points of the source.
    pub fn data(&self) -> &[char] {
        &self.data
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Content of the 1-indexed line `i`, without its line terminator.
    pub fn line(&self, i: usize) -> String {
        let (start, end) = self.lines[i - 1];
        self.data[start..end].iter().collect()
    }

    /// Path the source was read from, used to label diagnostics.
    pub fn path(&self) -> &str {
        &self.path
    }
}
