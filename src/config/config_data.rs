//! Configuration data structures.

use serde::{Deserialize, Serialize};

use super::source_root::SourceRoot;
use crate::model::{ChapterList, LoadOptions, CONTEXT_LINES};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directories to read annotated source from.
    #[serde(default = "default_roots")]
    pub roots: Vec<SourceRoot>,

    /// Path prefixes dropped when displaying file paths.
    #[serde(default = "default_strip_prefixes")]
    pub strip_prefixes: Vec<String>,

    /// Every chapter name, in book order.
    #[serde(default)]
    pub chapters: Vec<String>,

    /// Reject a section that is pushed in more than one place.
    #[serde(default)]
    pub strict_sections: bool,

    /// Context lines shown around each section.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

fn default_roots() -> Vec<SourceRoot> {
    vec![
        SourceRoot::new("java", &["java"]).with_exclude(&[
            // Generated from GenerateAst.java.
            "com/craftinginterpreters/lox/Expr.java",
            "com/craftinginterpreters/lox/Stmt.java",
        ]),
        SourceRoot::new("c", &["c", "h"]),
    ]
}

fn default_strip_prefixes() -> Vec<String> {
    vec!["com/craftinginterpreters/".to_string()]
}

fn default_context_lines() -> usize {
    CONTEXT_LINES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            strip_prefixes: default_strip_prefixes(),
            chapters: Vec::new(),
            strict_sections: false,
            context_lines: default_context_lines(),
        }
    }
}

impl Config {
    /// The chapter ordering described by `chapters`.
    pub fn chapter_order(&self) -> ChapterList {
        ChapterList::new(self.chapters.iter().map(String::as_str))
    }

    /// Options for [`SourceCode::load`](crate::model::SourceCode::load).
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict_sections: self.strict_sections,
            strip_prefixes: self.strip_prefixes.clone(),
        }
    }
}
