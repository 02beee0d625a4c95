/// Caret position: zero-based line and char column within that line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor {
    pub line: usize,
    pub ch: usize,
}

impl Cursor {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// The slice of a host editor the rewriter needs.
///
/// Columns are counted in chars. Line text never includes the line ending.
pub trait DocumentAccess {
    fn cursor(&self) -> Cursor;

    /// Text of line `index`, or `None` past the end of the document.
    fn line(&self, index: usize) -> Option<String>;

    /// Replace the text of line `index`, keeping its line ending.
    fn set_line(&mut self, index: usize, text: &str);

    fn set_cursor(&mut self, cursor: Cursor);

    fn line_count(&self) -> usize;
}
