//! Core model types: chapters, tagged lines, files and sections.

mod chapter;
mod origins;
mod section;
mod source_code;
mod source_file;
mod source_line;

pub use chapter::{Chapter, ChapterList, ChapterOrder, Coordinate, Point};
pub use origins::{SectionOrigins, UNWRITTEN_SECTION};
pub use section::{Location, Section, CONTEXT_LINES};
pub use source_code::{reconstruct_file, LoadOptions, SourceCode};
pub use source_file::{SourceFile, SourceKind};
pub use source_line::SourceLine;
