//! Annotated source reader.
//!
//! Reads a file's lines in order through a [`RegionStack`], keeping content
//! lines tagged with their revision range and dropping marker lines.

use std::path::Path;

use crate::errors::{Result, SnippetError};
use crate::model::{ChapterOrder, SectionOrigins, SourceFile, SourceKind, SourceLine};
use crate::text_location::TextLocation;

use super::markers::Marker;
use super::region::{RegionStack, Step};
use super::routine::{DeclarationHeuristic, RoutineDetector};

/// Reads annotated files one at a time, collecting where each section is
/// first pushed.
pub struct SourceReader<'o> {
    order: &'o dyn ChapterOrder,
    strict_sections: bool,
    origins: SectionOrigins,
}

impl<'o> SourceReader<'o> {
    pub fn new(order: &'o dyn ChapterOrder) -> Self {
        Self {
            order,
            strict_sections: false,
            origins: SectionOrigins::default(),
        }
    }

    /// Rejects a section that is pushed in more than one place.
    pub fn strict_sections(mut self, strict: bool) -> Self {
        self.strict_sections = strict;
        self
    }

    /// Reads one file using the declaration heuristic for its kind.
    pub fn read(&mut self, path: &Path, input: &str) -> Result<SourceFile> {
        let detector = DeclarationHeuristic::new(SourceKind::from_path(path));
        self.read_with(path, input, &detector)
    }

    /// Reads one file with a custom routine detector.
    pub fn read_with(
        &mut self,
        path: &Path,
        input: &str,
        detector: &dyn RoutineDetector,
    ) -> Result<SourceFile> {
        let mut file = SourceFile::new(path);
        let mut stack = RegionStack::new(self.order);
        let mut routine: Option<String> = None;

        for (index, raw) in input.lines().enumerate() {
            let line = raw.trim_end();
            let location = TextLocation::file_line(path, index + 1);

            if let Some(name) = detector.declaration(line) {
                routine = Some(name);
            }

            let step = stack.step(line).map_err(|source| SnippetError::Marker {
                location: location.clone(),
                source,
            })?;

            match step {
                Step::Content { start, end } => {
                    file.lines
                        .push(SourceLine::new(line, routine.clone(), start, end));
                }
                Step::Marker(marker) => self.record_push(&marker, &stack, location)?,
            }

            if detector.is_end(line) {
                routine = None;
            }
        }

        if !stack.is_balanced() {
            return Err(SnippetError::UnclosedRegions {
                path: path.to_path_buf(),
                open: stack.open_regions(),
            });
        }

        tracing::debug!("Read {} lines from {}", file.len(), path.display());
        Ok(file)
    }

    /// Returns the first push location of every section read so far.
    pub fn into_origins(self) -> SectionOrigins {
        self.origins
    }

    fn record_push(
        &mut self,
        marker: &Marker,
        stack: &RegionStack<'_>,
        location: TextLocation,
    ) -> Result<()> {
        let pushes_section = matches!(
            marker,
            Marker::BlockOpen { .. } | Marker::PushNumber(_) | Marker::PushChapter { .. }
        );
        let Some(start) = stack.current().start.as_ref().filter(|_| pushes_section) else {
            return Ok(());
        };

        if let Some(first) = self.origins.record(start, location.clone()) {
            if self.strict_sections {
                return Err(SnippetError::DuplicateAuthoring {
                    chapter: start.chapter.clone(),
                    number: start.number,
                    first: first.clone(),
                    second: location,
                });
            }
        }
        Ok(())
    }
}
