//! Directories that hold annotated source.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A directory of annotated files with the extensions to read from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceRoot {
    /// Directory, relative to the base directory.
    pub dir: PathBuf,

    /// File extensions to read, without the dot.
    pub extensions: Vec<String>,

    /// Paths relative to `dir` that are skipped, e.g. generated files.
    #[serde(default)]
    pub exclude: Vec<PathBuf>,
}

impl SourceRoot {
    /// Creates a new SourceRoot.
    pub fn new(dir: impl Into<PathBuf>, extensions: &[&str]) -> Self {
        Self {
            dir: dir.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            exclude: Vec::new(),
        }
    }

    /// Adds paths to skip.
    pub fn with_exclude(mut self, exclude: &[&str]) -> Self {
        self.exclude = exclude.iter().map(PathBuf::from).collect();
        self
    }

    /// Glob patterns matching every candidate file under this root.
    pub fn patterns(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| format!("{}/**/*.{}", self.dir.display(), ext))
            .collect()
    }

    /// Whether `relative` (a path inside this root) should be skipped.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.iter().any(|e| e == relative)
    }
}
