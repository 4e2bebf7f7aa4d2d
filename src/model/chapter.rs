//! Chapters, revision points and the ordering between them.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A chapter identifies a named unit of revision history.
///
/// Chapters are opaque names; their order comes from a [`ChapterOrder`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chapter(String);

impl Chapter {
    /// Creates a new Chapter from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Chapter {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Chapter {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Chapter {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Total order over chapters.
///
/// Supplied from outside the parser; every chapter named by a marker must
/// have an ordinal.
pub trait ChapterOrder {
    /// Returns the ordinal of `chapter`, or `None` if it is not known.
    fn ordinal(&self, chapter: &Chapter) -> Option<usize>;
}

impl<T: ChapterOrder + ?Sized> ChapterOrder for &T {
    fn ordinal(&self, chapter: &Chapter) -> Option<usize> {
        (**self).ordinal(chapter)
    }
}

/// A chapter ordering given by an explicit list of names.
#[derive(Debug, Clone, Default)]
pub struct ChapterList {
    chapters: Vec<Chapter>,
    index: HashMap<Chapter, usize>,
}

impl ChapterList {
    /// Creates an ordering where each chapter's ordinal is its list position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Chapter>,
    {
        let chapters: Vec<Chapter> = names.into_iter().map(Into::into).collect();
        let index = chapters
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { chapters, index }
    }

    /// Returns the chapters in order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

impl ChapterOrder for ChapterList {
    fn ordinal(&self, chapter: &Chapter) -> Option<usize> {
        self.index.get(chapter).copied()
    }
}

/// A point on the revision timeline, compared by `(ordinal, number)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    pub ordinal: usize,
    pub number: u32,
}

impl Point {
    pub fn new(ordinal: usize, number: u32) -> Self {
        Self { ordinal, number }
    }
}

/// A `(chapter, number)` pair with the chapter's ordinal resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinate {
    pub chapter: Chapter,
    pub ordinal: usize,
    pub number: u32,
}

impl Coordinate {
    pub fn new(chapter: Chapter, ordinal: usize, number: u32) -> Self {
        Self {
            chapter,
            ordinal,
            number,
        }
    }

    /// Resolves `chapter` through `order`.
    pub fn resolve(chapter: Chapter, number: u32, order: &dyn ChapterOrder) -> Option<Self> {
        let ordinal = order.ordinal(&chapter)?;
        Some(Self::new(chapter, ordinal, number))
    }

    /// Returns this coordinate's place on the timeline.
    pub fn point(&self) -> Point {
        Point::new(self.ordinal, self.number)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.chapter, self.number)
    }
}
