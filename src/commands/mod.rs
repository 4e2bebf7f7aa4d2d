//! Command implementations.

mod check;
mod lines;
mod sections;
mod split;

use std::path::Path;

pub use check::{check, CheckOptions};
pub use lines::{lines, LinesOptions};
pub use sections::{render_sections, sections, SectionsOptions};
pub use split::{split, SplitOptions};

use crate::errors::{Result, SnippetError};
use crate::model::{SourceCode, SourceFile};

/// Looks up a file by relative path, falling back to its display path.
fn find_file<'s>(source: &'s SourceCode, name: &Path) -> Result<&'s SourceFile> {
    if let Some(file) = source.file(name) {
        return Ok(file);
    }
    source
        .files()
        .find(|f| Path::new(&f.display_path) == name)
        .ok_or_else(|| SnippetError::FileNotFound(name.to_path_buf()))
}
