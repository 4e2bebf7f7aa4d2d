//! Where each section was first pushed during a load.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::chapter::{Chapter, Coordinate};
use crate::text_location::TextLocation;

/// Section number reserved for chapters that have not been written yet.
///
/// Sections with this number may appear in any number of places.
pub const UNWRITTEN_SECTION: u32 = 99;

/// First push location for every `(chapter, number)` seen in a load.
#[derive(Debug, Clone, Default)]
pub struct SectionOrigins {
    first: HashMap<(Chapter, u32), TextLocation>,
}

impl SectionOrigins {
    /// Records a push of `coord` at `location`.
    ///
    /// Returns the earlier location if the section was already pushed.
    /// Unwritten sections are never recorded.
    pub fn record(&mut self, coord: &Coordinate, location: TextLocation) -> Option<&TextLocation> {
        if coord.number == UNWRITTEN_SECTION {
            return None;
        }
        match self.first.entry((coord.chapter.clone(), coord.number)) {
            Entry::Occupied(entry) => Some(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                entry.insert(location);
                None
            }
        }
    }

    /// Returns where `chapter`/`number` was first pushed.
    pub fn get(&self, chapter: &Chapter, number: u32) -> Option<&TextLocation> {
        self.first.get(&(chapter.clone(), number))
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}
