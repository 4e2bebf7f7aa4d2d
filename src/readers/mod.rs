//! Readers for annotated source files.

mod annotated;
mod markers;
mod region;
mod routine;

pub use annotated::SourceReader;
pub use markers::Marker;
pub use region::{Region, RegionStack, Step};
pub use routine::{DeclarationHeuristic, RoutineDetector};
