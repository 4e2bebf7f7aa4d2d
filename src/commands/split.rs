//! Split command implementation.

use std::fs;
use std::path::PathBuf;

use super::find_file;
use crate::errors::{Result, SnippetError};
use crate::interface::Context;
use crate::model::{reconstruct_file, Chapter, ChapterOrder, Point};

/// Options for the split command.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// File to reconstruct. Ignored when `output` is set.
    pub file: Option<PathBuf>,
    pub chapter: Chapter,
    pub number: u32,
    /// Write every file at this point under this directory.
    pub output: Option<PathBuf>,
}

/// Reconstructs files as of a section of a chapter.
pub fn split(ctx: &Context, options: SplitOptions) -> Result<()> {
    let source = ctx.load()?;
    let ordinal = ctx
        .chapters
        .ordinal(&options.chapter)
        .ok_or_else(|| SnippetError::UnknownChapter(options.chapter.clone()))?;
    let point = Point::new(ordinal, options.number);

    let Some(output) = &options.output else {
        let name = options
            .file
            .as_ref()
            .ok_or_else(|| SnippetError::Config("split needs a file or --output".to_string()))?;
        let file = find_file(&source, name)?;
        print!("{}", reconstruct_file(file, point));
        return Ok(());
    };

    let output_dir = ctx.resolve_path(output);
    let mut written = 0;
    for file in source.files() {
        let text = reconstruct_file(file, point);
        if text.is_empty() {
            continue;
        }
        let target = output_dir.join(&file.display_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, text)?;
        tracing::debug!("Wrote {}", target.display());
        written += 1;
    }

    tracing::info!(
        "Wrote {} files for {} {} to {}",
        written,
        options.chapter,
        options.number,
        output_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::tempdir;

    const VM: &str = "\
//> A 1
int main() {
//> B 1
  run();
//< B 1
}
//< A 1
";

    fn write_tree(dir: &std::path::Path) -> Context {
        fs::create_dir_all(dir.join("c")).unwrap();
        fs::write(dir.join("c/main.c"), VM).unwrap();
        fs::write(dir.join("c/vm.c"), "//> B 1\nvoid run() {}\n//< B 1\n").unwrap();

        let config = Config {
            chapters: vec!["A".to_string(), "B".to_string()],
            ..Default::default()
        };
        Context::new(config, dir.to_path_buf())
    }

    #[test]
    fn test_split_to_directory_skips_empty_files() {
        let dir = tempdir().unwrap();
        let ctx = write_tree(dir.path());

        let options = SplitOptions {
            file: None,
            chapter: Chapter::new("A"),
            number: 1,
            output: Some(PathBuf::from("out")),
        };
        split(&ctx, options).unwrap();

        let main = fs::read_to_string(dir.path().join("out/main.c")).unwrap();
        assert_eq!(main, "int main() {\n}\n");
        assert!(!dir.path().join("out/vm.c").exists());
    }

    #[test]
    fn test_split_later_chapter() {
        let dir = tempdir().unwrap();
        let ctx = write_tree(dir.path());

        let options = SplitOptions {
            file: None,
            chapter: Chapter::new("B"),
            number: 1,
            output: Some(dir.path().join("out")),
        };
        split(&ctx, options).unwrap();

        let main = fs::read_to_string(dir.path().join("out/main.c")).unwrap();
        assert_eq!(main, "int main() {\n  run();\n}\n");
        assert!(dir.path().join("out/vm.c").exists());
    }

    #[test]
    fn test_split_unknown_chapter() {
        let dir = tempdir().unwrap();
        let ctx = write_tree(dir.path());

        let options = SplitOptions {
            file: Some(PathBuf::from("main.c")),
            chapter: Chapter::new("Z"),
            number: 1,
            output: None,
        };
        let err = split(&ctx, options).unwrap_err();
        assert!(matches!(err, SnippetError::UnknownChapter(_)));
    }

    #[test]
    fn test_split_missing_file() {
        let dir = tempdir().unwrap();
        let ctx = write_tree(dir.path());

        let options = SplitOptions {
            file: Some(PathBuf::from("compiler.c")),
            chapter: Chapter::new("A"),
            number: 1,
            output: None,
        };
        let err = split(&ctx, options).unwrap_err();
        assert!(matches!(err, SnippetError::FileNotFound(_)));
    }
}
