//! Execution context for snippet operations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::errors::Result;
use crate::io::{FileCache, RealFileCache};
use crate::model::{ChapterList, SourceCode};

/// Context for snippet operations.
///
/// Contains configuration, the chapter ordering, and file system access.
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Chapter ordering built from `config.chapters`.
    pub chapters: ChapterList,
    /// File cache for reading files.
    pub file_cache: Arc<dyn FileCache>,
    /// Base directory for operations.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a new context with the given configuration.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        let file_cache = Arc::new(RealFileCache::new(base_dir.clone()));
        let chapters = config.chapter_order();

        Self {
            config,
            chapters,
            file_cache,
            base_dir,
        }
    }

    /// Creates a context from the current directory.
    pub fn from_current_dir() -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        let config = crate::config::read_config(&base_dir)?;
        Ok(Self::new(config, base_dir))
    }

    /// Replaces the file cache, e.g. with a [`VirtualFS`](crate::io::VirtualFS).
    pub fn with_file_cache(mut self, file_cache: Arc<dyn FileCache>) -> Self {
        self.file_cache = file_cache;
        self
    }

    /// Returns `(relative path, path under the base directory)` for every
    /// annotated file, root by root, sorted within each root.
    pub fn source_files(&self) -> Result<Vec<(PathBuf, PathBuf)>> {
        let mut files = Vec::new();

        for root in &self.config.roots {
            let mut found = Vec::new();
            for pattern in root.patterns() {
                found.extend(self.file_cache.glob(&pattern)?);
            }
            found.sort();
            found.dedup();

            for full in found {
                let relative = match full.strip_prefix(&root.dir) {
                    Ok(relative) => relative.to_path_buf(),
                    Err(_) => full.clone(),
                };
                if root.is_excluded(&relative) {
                    tracing::debug!("Skipping excluded {}", full.display());
                    continue;
                }
                files.push((relative, full));
            }
        }

        Ok(files)
    }

    /// Reads and parses every annotated file.
    pub fn load(&self) -> Result<SourceCode> {
        let mut inputs = Vec::new();
        for (relative, full) in self.source_files()? {
            let contents = self.file_cache.read(&full)?;
            inputs.push((relative, contents));
        }
        SourceCode::load(inputs, &self.chapters, &self.config.load_options())
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
