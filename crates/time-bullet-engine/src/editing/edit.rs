use crate::editing::{Cursor, DocumentAccess};

/// A computed single-line replacement plus the caret position after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub line: usize,
    pub new_text: String,
    pub new_cursor_column: usize,
}

impl LineEdit {
    /// Write the line, then move the cursor.
    pub fn apply<D: DocumentAccess + ?Sized>(&self, doc: &mut D) {
        doc.set_line(self.line, &self.new_text);
        doc.set_cursor(Cursor::new(self.line, self.new_cursor_column));
    }
}
