use std::borrow::Cow;
use std::ops::Range;

use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::editing::{Cursor, DocumentAccess};

/// Marker types for list items
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    Dash,          // "-"
    Asterisk,      // "*"
    Plus,          // "+"
    Numbered(u64), // "1.", "2.", etc.
}

impl Marker {
    /// The marker that continues this one on the next line, if any.
    pub fn next(&self) -> Option<Marker> {
        match self {
            Marker::Numbered(n) => n.checked_add(1).map(Marker::Numbered),
            other => Some(other.clone()),
        }
    }

    pub fn as_text(&self) -> Cow<'static, str> {
        match self {
            Marker::Dash => Cow::Borrowed("-"),
            Marker::Asterisk => Cow::Borrowed("*"),
            Marker::Plus => Cow::Borrowed("+"),
            Marker::Numbered(n) => Cow::Owned(format!("{n}.")),
        }
    }
}

/// Extract indentation and list marker from a line
pub fn extract_list_info(line: &str) -> (&str, Option<Marker>) {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];

    let marker = if trimmed.starts_with("- ") {
        Some(Marker::Dash)
    } else if trimmed.starts_with("* ") {
        Some(Marker::Asterisk)
    } else if trimmed.starts_with("+ ") {
        Some(Marker::Plus)
    } else if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        trimmed
            .find(". ")
            .and_then(|dot_pos| trimmed[..dot_pos].parse().ok())
            .map(Marker::Numbered)
    } else {
        None
    };

    (indent, marker)
}

/// In-memory markdown document backed by an xi-rope buffer.
///
/// This is the editor model the terminal host drives and the stand-in for a
/// real editor in tests. The buffer round-trips bytes exactly, including
/// `\r\n` line endings, which are never part of a line's text.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) buffer: Rope,
    pub(crate) cursor: Cursor,
    /// Incremented on every edit
    pub(crate) version: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            buffer: Rope::from(""),
            cursor: Cursor::default(),
            version: 0,
        }
    }

    /// Create a new document from raw bytes, cursor at the start
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self {
            buffer: Rope::from(text),
            cursor: Cursor::default(),
            version: 0,
        })
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// All lines, without line endings
    pub fn lines(&self) -> Vec<String> {
        let text = self.slice_to_cow(0..self.len());
        line_ranges(&text)
            .into_iter()
            .map(|range| text[range].to_string())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.buffer.len()
    }

    pub(crate) fn slice_to_cow(&self, range: Range<usize>) -> Cow<'_, str> {
        let doc_len = self.buffer.len();

        // Clamp range to document bounds to prevent xi-rope panic
        let start = range.start.min(doc_len);
        let end = range.end.min(doc_len).max(start);

        self.buffer.slice_to_cow(start..end)
    }

    /// Byte range of line `index`, excluding its line ending
    fn line_range(&self, index: usize) -> Option<Range<usize>> {
        line_ranges(&self.slice_to_cow(0..self.len()))
            .into_iter()
            .nth(index)
    }

    fn cursor_offset(&self) -> usize {
        let Some(range) = self.line_range(self.cursor.line) else {
            return self.len();
        };
        let line = self.slice_to_cow(range.clone());
        range.start + char_to_byte(&line, self.cursor.ch)
    }

    fn set_cursor_offset(&mut self, offset: usize) {
        let text = self.slice_to_cow(0..self.len());
        let (line, ch) = byte_to_point_in_text(&text, offset);
        self.cursor = Cursor::new(line, ch);
    }

    fn replace(&mut self, range: Range<usize>, text: &str) {
        let mut builder = Builder::new(self.len());
        builder.replace(range, Rope::from(text));
        self.buffer = builder.build().apply(&self.buffer);
        self.version += 1;
    }

    fn clamp(&self, cursor: Cursor) -> Cursor {
        let lines = self.lines();
        let line = cursor.line.min(lines.len().saturating_sub(1));
        let max_ch = lines.get(line).map_or(0, |l| l.chars().count());
        Cursor::new(line, cursor.ch.min(max_ch))
    }

    /// Insert text at the cursor and move the cursor past it.
    pub fn insert_text(&mut self, text: &str) {
        let at = self.cursor_offset();
        self.replace(at..at, text);
        self.set_cursor_offset(at + text.len());
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_text(c.encode_utf8(&mut buf));
    }

    /// Plain Enter: split the line at the cursor, continuing any list marker.
    ///
    /// `- item|` becomes `- item` and `- |`; indentation is carried over.
    pub fn split_line(&mut self) {
        let line = self.line(self.cursor.line).unwrap_or_default();
        let (indent, marker) = extract_list_info(&line);

        let mut insert = String::from("\n");
        insert.push_str(indent);
        if let Some(next) = marker.and_then(|marker| marker.next()) {
            insert.push_str(&next.as_text());
            insert.push(' ');
        }

        self.insert_text(&insert);
    }

    /// Delete the char before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        let at = self.cursor_offset();
        if at == 0 {
            return;
        }
        let before = self.slice_to_cow(0..at);
        let start = if before.ends_with("\r\n") {
            at - 2
        } else {
            before
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i)
        };
        self.replace(start..at, "");
        self.set_cursor_offset(start);
    }

    pub fn move_left(&mut self) {
        if self.cursor.ch > 0 {
            self.cursor.ch -= 1;
        } else if self.cursor.line > 0 {
            let line = self.cursor.line - 1;
            let ch = self.line(line).map_or(0, |l| l.chars().count());
            self.cursor = Cursor::new(line, ch);
        }
    }

    pub fn move_right(&mut self) {
        let len = self.line(self.cursor.line).map_or(0, |l| l.chars().count());
        if self.cursor.ch < len {
            self.cursor.ch += 1;
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor = Cursor::new(self.cursor.line + 1, 0);
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor = self.clamp(Cursor::new(self.cursor.line - 1, self.cursor.ch));
        }
    }

    pub fn move_down(&mut self) {
        self.cursor = self.clamp(Cursor::new(self.cursor.line + 1, self.cursor.ch));
    }

    pub fn move_line_start(&mut self) {
        self.cursor.ch = 0;
    }

    pub fn move_line_end(&mut self) {
        self.cursor.ch = self.line(self.cursor.line).map_or(0, |l| l.chars().count());
    }
}

impl DocumentAccess for Document {
    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn line(&self, index: usize) -> Option<String> {
        self.line_range(index)
            .map(|range| self.slice_to_cow(range).into_owned())
    }

    fn set_line(&mut self, index: usize, text: &str) {
        if let Some(range) = self.line_range(index) {
            self.replace(range, text);
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = self.clamp(cursor);
    }

    fn line_count(&self) -> usize {
        line_ranges(&self.slice_to_cow(0..self.len())).len()
    }
}

/// Content ranges of every line. A trailing newline opens a final empty line.
fn line_ranges(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut ranges = Vec::new();
    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        if byte == b'\n' {
            let end = if i > start && bytes[i - 1] == b'\r' {
                i - 1
            } else {
                i
            };
            ranges.push(start..end);
            start = i + 1;
        }
    }
    ranges.push(start..bytes.len());

    ranges
}

fn char_to_byte(line: &str, ch: usize) -> usize {
    line.char_indices()
        .nth(ch)
        .map_or(line.len(), |(i, _)| i)
}

/// Convert a byte offset to (line, char column)
fn byte_to_point_in_text(text: &str, byte_offset: usize) -> (usize, usize) {
    let offset = byte_offset.min(text.len());

    let mut row = 0;
    let mut last_newline = 0;

    for (i, byte) in text.bytes().enumerate().take(offset) {
        if byte == b'\n' {
            row += 1;
            last_newline = i + 1;
        }
    }

    let col = text[last_newline..offset].chars().count();
    (row, col)
}
