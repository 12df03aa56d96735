//! Immutable source buffer addressed by UTF-16 code unit.
//!
//! The grammar matches surrogate escapes literally, so all cursor arithmetic
//! is done in code units, not code points. Byte offsets into the original
//! UTF-8 text are derived only at the diagnostics boundary.

use std::sync::Arc;

use miette::NamedSource;

/// A parsed-over source: display name plus the text in both encodings.
#[derive(Debug, Clone)]
pub struct Input {
    name: String,
    text: Arc<String>,
    units: Arc<Vec<u16>>,
}

/// Location data for one line of the input, 1-based like editor positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Input {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let units = text.encode_utf16().collect();
        Self {
            name: name.into(),
            text: Arc::new(text),
            units: Arc::new(units),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit_at(&self, i: usize) -> Option<u16> {
        self.units.get(i).copied()
    }

    /// The text of `[start, end)` in code units.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.units.len());
        let start = start.min(end);
        String::from_utf16_lossy(&self.units[start..end])
    }

    /// Maps a code-unit offset to a byte offset into the UTF-8 text.
    pub fn byte_offset(&self, unit_offset: usize) -> usize {
        let mut units = 0usize;
        for (bytes, ch) in self.text.char_indices() {
            if units >= unit_offset {
                return bytes;
            }
            units += ch.len_utf16();
        }
        self.text.len()
    }

    /// The line containing `offset`, with 1-based line and column numbers.
    /// Offsets at or past the end of input land on the final line.
    pub fn line_of(&self, offset: usize) -> LineInfo {
        let offset = offset.min(self.units.len());
        let mut line_start = 0usize;
        let mut line = 1usize;
        let mut i = 0usize;
        while i < offset {
            if self.units[i] == u16::from(b'\n') {
                line += 1;
                line_start = i + 1;
            }
            i += 1;
        }
        let mut line_end = offset;
        while line_end < self.units.len() && self.units[line_end] != u16::from(b'\n') {
            line_end += 1;
        }
        let mut text = self.slice(line_start, line_end);
        if text.ends_with('\r') {
            text.pop();
        }
        LineInfo {
            text,
            line,
            column: offset - line_start + 1,
        }
    }

    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.text.as_ref().clone())
    }
}
