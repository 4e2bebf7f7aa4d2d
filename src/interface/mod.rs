//! High-level interface for snippet operations.

mod context;

pub use context::Context;
