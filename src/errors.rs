//! Error types for loading and querying annotated source.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::Chapter;
use crate::text_location::TextLocation;

/// Main error type for snippet operations.
#[derive(Error, Debug)]
pub enum SnippetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{location}: {source}")]
    Marker {
        location: TextLocation,
        source: MarkerError,
    },

    #[error("{}: Ended with more than one state on the stack: {}", path.display(), open.join(", "))]
    UnclosedRegions { path: PathBuf, open: Vec<String> },

    #[error("{chapter} {number} appears in two files, {} and {}", first.display(), second.display())]
    DuplicateSection {
        chapter: Chapter,
        number: u32,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{second}: Duplicate section \"{chapter} {number}\" is also in {first}")]
    DuplicateAuthoring {
        chapter: Chapter,
        number: u32,
        first: TextLocation,
        second: TextLocation,
    },

    #[error("{} was loaded more than once", .0.display())]
    DuplicateFile(PathBuf),

    #[error("Could not find file \"{}\"", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unknown chapter \"{0}\"")]
    UnknownChapter(Chapter),
}

/// A marker that cannot be applied to the current region stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("Can't push an earlier number {number} from {current}.")]
    PushEarlierNumber { number: u32, current: u32 },

    #[error("Can't push to same number {0}.")]
    PushSameNumber(u32),

    #[error("Expecting to pop {expected} but got {found}.")]
    NumberPopMismatch { expected: u32, found: u32 },

    #[error(
        "Expecting to pop \"{expected_chapter} {expected_number}\" but got \"{found_chapter} {found_number}\"."
    )]
    ChapterPopMismatch {
        expected_chapter: Chapter,
        expected_number: u32,
        found_chapter: Chapter,
        found_number: u32,
    },

    #[error("Cannot pop last state.")]
    PopRoot,

    #[error("Pushing same state \"{chapter} {number}\"")]
    PushSameState { chapter: Chapter, number: u32 },

    #[error("Pushing same chapter, just use \"//> {number}\"")]
    PushSameChapter { chapter: Chapter, number: u32 },

    #[error("Can't push earlier chapter \"{chapter}\" from \"{current}\".")]
    PushEarlierChapter { chapter: Chapter, current: Chapter },

    #[error("No section in effect.")]
    NoSectionInEffect,

    #[error("No block comment section to close.")]
    NoBlockOpen,

    #[error("Removal point \"{end}\" comes before \"{start}\".")]
    EndBeforeStart { start: String, end: String },

    #[error("Unknown chapter \"{0}\"")]
    UnknownChapter(Chapter),

    #[error("Section number {0} is too large.")]
    InvalidNumber(String),
}

/// Result type alias for snippet operations.
pub type Result<T> = std::result::Result<T, SnippetError>;
