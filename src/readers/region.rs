//! Region stack state machine.
//!
//! Each marker line moves the stack; each content line is tagged with the
//! coordinates of the innermost region. The bottom frame is a root with no
//! chapter that can never be popped.

use crate::errors::MarkerError;
use crate::model::{Chapter, ChapterOrder, Coordinate};

use super::markers::Marker;

/// One frame of the region stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Region {
    /// Where lines in this region are introduced. `None` only for the root.
    pub start: Option<Coordinate>,
    /// Where lines in this region are removed. Set only by block comments.
    pub end: Option<Coordinate>,
}

impl Region {
    fn root() -> Self {
        Self::default()
    }

    fn open(start: Coordinate, end: Option<Coordinate>) -> Self {
        Self {
            start: Some(start),
            end,
        }
    }
}

/// The outcome of feeding one line to the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The line was a marker and has been applied.
    Marker(Marker),
    /// The line is content belonging to the given range.
    Content {
        start: Coordinate,
        end: Option<Coordinate>,
    },
}

/// Stack of active regions while reading one file.
pub struct RegionStack<'o> {
    order: &'o dyn ChapterOrder,
    frames: Vec<Region>,
}

impl<'o> RegionStack<'o> {
    /// Creates a stack holding only the root frame.
    pub fn new(order: &'o dyn ChapterOrder) -> Self {
        Self {
            order,
            frames: vec![Region::root()],
        }
    }

    /// The innermost region.
    pub fn current(&self) -> &Region {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    /// Number of frames, including the root.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether every pushed region has been popped.
    pub fn is_balanced(&self) -> bool {
        self.frames.len() == 1
    }

    /// Whether the innermost region came from a block comment.
    pub fn in_block(&self) -> bool {
        self.current().end.is_some()
    }

    /// Describes the regions still open, innermost first.
    pub fn open_regions(&self) -> Vec<String> {
        self.frames
            .iter()
            .rev()
            .filter_map(|r| r.start.as_ref())
            .map(|c| c.to_string())
            .collect()
    }

    /// Classifies `line` and applies it if it is a marker.
    ///
    /// A lone `*/` only closes a region while a block region is open;
    /// otherwise it is ordinary content.
    pub fn step(&mut self, line: &str) -> Result<Step, MarkerError> {
        match Marker::parse(line)? {
            Some(Marker::BlockClose) if !self.in_block() => self.content(),
            Some(marker) => {
                self.apply(&marker)?;
                Ok(Step::Marker(marker))
            }
            None => self.content(),
        }
    }

    /// Applies a single marker transition.
    pub fn apply(&mut self, marker: &Marker) -> Result<(), MarkerError> {
        tracing::trace!(?marker, depth = self.depth(), "applying marker");

        match marker {
            Marker::BlockOpen {
                chapter,
                number,
                end_chapter,
                end_number,
            } => {
                let start = self.resolve(chapter, *number)?;
                let end = self.resolve(end_chapter, *end_number)?;
                if end.point() < start.point() {
                    return Err(MarkerError::EndBeforeStart {
                        start: start.to_string(),
                        end: end.to_string(),
                    });
                }
                self.frames.push(Region::open(start, Some(end)));
            }

            Marker::BlockPop { end_number } => {
                let start = self.active()?.clone();
                if *end_number < start.number {
                    return Err(MarkerError::EndBeforeStart {
                        start: start.to_string(),
                        end: format!("{} {}", start.chapter, end_number),
                    });
                }
                let end = Coordinate::new(start.chapter.clone(), start.ordinal, *end_number);
                self.frames.push(Region::open(start, Some(end)));
            }

            Marker::BlockClose => {
                if !self.in_block() {
                    return Err(MarkerError::NoBlockOpen);
                }
                self.frames.pop();
            }

            Marker::PushNumber(number) => {
                let current = self.active()?;
                if *number < current.number {
                    return Err(MarkerError::PushEarlierNumber {
                        number: *number,
                        current: current.number,
                    });
                }
                if *number == current.number {
                    return Err(MarkerError::PushSameNumber(*number));
                }
                let start = Coordinate::new(current.chapter.clone(), current.ordinal, *number);
                self.frames.push(Region::open(start, None));
            }

            Marker::PopNumber(number) => {
                let current = self.current().start.as_ref().ok_or(MarkerError::PopRoot)?;
                if *number != current.number {
                    return Err(MarkerError::NumberPopMismatch {
                        expected: current.number,
                        found: *number,
                    });
                }
                self.frames.pop();
            }

            Marker::PushChapter { chapter, number } => {
                let start = self.resolve(chapter, *number)?;
                if let Some(current) = &self.current().start {
                    if *chapter == current.chapter && *number == current.number {
                        return Err(MarkerError::PushSameState {
                            chapter: chapter.clone(),
                            number: *number,
                        });
                    }
                    if *chapter == current.chapter {
                        return Err(MarkerError::PushSameChapter {
                            chapter: chapter.clone(),
                            number: *number,
                        });
                    }
                    if start.ordinal < current.ordinal {
                        return Err(MarkerError::PushEarlierChapter {
                            chapter: chapter.clone(),
                            current: current.chapter.clone(),
                        });
                    }
                }
                self.frames.push(Region::open(start, None));
            }

            Marker::PopChapter { chapter, number } => {
                let current = self.current().start.as_ref().ok_or(MarkerError::PopRoot)?;
                if *chapter != current.chapter || *number != current.number {
                    return Err(MarkerError::ChapterPopMismatch {
                        expected_chapter: current.chapter.clone(),
                        expected_number: current.number,
                        found_chapter: chapter.clone(),
                        found_number: *number,
                    });
                }
                self.frames.pop();
            }
        }

        Ok(())
    }

    fn content(&self) -> Result<Step, MarkerError> {
        let region = self.current();
        let start = region.start.clone().ok_or(MarkerError::NoSectionInEffect)?;
        Ok(Step::Content {
            start,
            end: region.end.clone(),
        })
    }

    fn active(&self) -> Result<&Coordinate, MarkerError> {
        self.current()
            .start
            .as_ref()
            .ok_or(MarkerError::NoSectionInEffect)
    }

    fn resolve(&self, chapter: &Chapter, number: u32) -> Result<Coordinate, MarkerError> {
        Coordinate::resolve(chapter.clone(), number, self.order)
            .ok_or_else(|| MarkerError::UnknownChapter(chapter.clone()))
    }
}
