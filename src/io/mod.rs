//! File system access.

mod file_cache;

pub use file_cache::{FileCache, RealFileCache, VirtualFS};
