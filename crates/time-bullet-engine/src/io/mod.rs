use crate::editing::Document;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),
    #[error("Not a markdown file: {0}")]
    NotMarkdown(PathBuf),
}

/// Open a markdown file as a document. A missing file gives an empty one.
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    validate_markdown_path(path)?;
    if !path.exists() {
        return Ok(Document::new());
    }
    let bytes = fs::read(path)?;
    Document::from_bytes(&bytes).map_err(|_| IoError::InvalidUtf8(path.to_path_buf()))
}

/// Write the document's exact bytes to `path`
pub fn write_document(path: &Path, document: &Document) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, document.to_bytes())?;
    Ok(())
}

pub fn validate_markdown_path(path: &Path) -> Result<(), IoError> {
    match path.extension() {
        Some(ext) if ext == "md" || ext == "markdown" => Ok(()),
        _ => Err(IoError::NotMarkdown(path.to_path_buf())),
    }
}
