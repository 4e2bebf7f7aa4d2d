//! Snippets - chapter-annotated source reconstruction
//!
//! This library reads source files annotated with chapter markers and answers
//! two questions about them: what a file looked like at a given point in the
//! book, and what each numbered section of a chapter adds and removes.
//!
//! # Example
//!
//! ```no_run
//! use snippets::interface::Context;
//! use snippets::model::Chapter;
//!
//! let ctx = Context::from_current_dir().unwrap();
//! let source = ctx.load().unwrap();
//! let sections = source.sections(&Chapter::new("Scanning"), &ctx.chapters).unwrap();
//! for (number, section) in &sections {
//!     println!("{} {} {}", number, section.display_path, section.location());
//! }
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod text_location;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{MarkerError, Result, SnippetError};
pub use interface::Context;
pub use model::{Chapter, ChapterList, ChapterOrder, Section, SourceCode, SourceFile, SourceLine};

// Re-export command options
pub use commands::{CheckOptions, LinesOptions, SectionsOptions, SplitOptions};
