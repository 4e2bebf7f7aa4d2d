//! Tagged lines of annotated source and the presence test over them.

use std::fmt;

use serde::Serialize;

use super::chapter::{Coordinate, Point};

/// A content line tagged with the revision range in which it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    /// Line text without the trailing newline.
    pub text: String,
    /// Innermost routine enclosing the line, if one was detected.
    pub routine: Option<String>,
    /// Where the line is introduced.
    pub start: Coordinate,
    /// Where the line is removed, if ever.
    pub end: Option<Coordinate>,
}

impl SourceLine {
    pub fn new(
        text: impl Into<String>,
        routine: Option<String>,
        start: Coordinate,
        end: Option<Coordinate>,
    ) -> Self {
        Self {
            text: text.into(),
            routine,
            start,
            end,
        }
    }

    /// Whether this line exists in the file at `point`.
    ///
    /// A line is present from its start coordinate up to and including its
    /// end coordinate.
    pub fn is_present(&self, point: Point) -> bool {
        if point < self.start.point() {
            return false;
        }
        match &self.end {
            Some(end) => point <= end.point(),
            None => true,
        }
    }
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:72} // {}", self.text, self.start)?;
        if let Some(end) = &self.end {
            write!(f, " < {}", end)?;
        }
        if let Some(routine) = &self.routine {
            write!(f, " (in {})", routine)?;
        }
        Ok(())
    }
}
