//! A parsed annotated source file.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::source_line::SourceLine;

/// The kind of a source file, used to pick parsing heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Java,
    C,
    Other,
}

impl SourceKind {
    /// Determines the kind from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("java") => SourceKind::Java,
            Some("c") | Some("h") => SourceKind::C,
            _ => SourceKind::Other,
        }
    }

    /// Language name used when rendering code from this file.
    pub fn language(&self) -> &'static str {
        match self {
            SourceKind::Java => "java",
            SourceKind::C | SourceKind::Other => "c",
        }
    }
}

/// An annotated source file and its tagged content lines.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    /// Path relative to the source root it was found in.
    pub path: PathBuf,
    /// Shortened path used when reporting.
    pub display_path: String,
    pub kind: SourceKind,
    pub lines: Vec<SourceLine>,
}

impl SourceFile {
    /// Creates an empty file. The display path is the path itself.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_path = path.to_string_lossy().into_owned();
        let kind = SourceKind::from_path(&path);
        Self {
            path,
            display_path,
            kind,
            lines: Vec::new(),
        }
    }

    /// Removes the first matching prefix from the display path.
    pub fn with_stripped_prefix(mut self, prefixes: &[String]) -> Self {
        if let Some(rest) = prefixes
            .iter()
            .find_map(|p| self.display_path.strip_prefix(p.as_str()))
        {
            self.display_path = rest.to_string();
        }
        self
    }

    pub fn language(&self) -> &'static str {
        self.kind.language()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
