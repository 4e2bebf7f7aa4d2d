//! Shared test utilities.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::interface::Context;
use crate::io::VirtualFS;
use crate::model::{ChapterList, LoadOptions, SourceCode, SourceFile};

/// A three chapter ordering: `A`, `B`, `C`.
pub fn chapters() -> ChapterList {
    ChapterList::new(["A", "B", "C"])
}

/// Loads `(path, contents)` pairs against [`chapters`], panicking on error.
pub fn load(files: &[(&str, &str)]) -> SourceCode {
    SourceCode::load(files.iter().copied(), &chapters(), &LoadOptions::default()).unwrap()
}

/// Returns the text of every line in `file`.
pub fn texts(file: &SourceFile) -> Vec<&str> {
    file.lines.iter().map(|l| l.text.as_str()).collect()
}

/// A context over an in-memory tree using the default roots and chapters
/// `A`, `B`, `C`.
pub fn virtual_context(files: &[(&str, &str)]) -> Context {
    virtual_context_with_chapters(&["A", "B", "C"], files)
}

/// A context over an in-memory tree using the default roots and the given
/// chapter order.
pub fn virtual_context_with_chapters(chapters: &[&str], files: &[(&str, &str)]) -> Context {
    let mut vfs = VirtualFS::new();
    for (path, content) in files {
        vfs.add_file(*path, *content);
    }
    let config = Config {
        chapters: chapters.iter().map(|c| c.to_string()).collect(),
        ..Default::default()
    };
    Context::new(config, PathBuf::from("/book")).with_file_cache(Arc::new(vfs))
}
