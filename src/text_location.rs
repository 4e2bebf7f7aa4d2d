//! Text location tracking for error reporting.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A line within an annotated source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TextLocation {
    /// The file path (if known).
    pub filename: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
}

impl TextLocation {
    /// Creates a TextLocation with file and line.
    pub fn file_line(filename: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            filename: Some(filename.into()),
            line,
        }
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(path) => write!(f, "{} line {}", path.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}
