//! The parsed model of every annotated file, and file reconstruction.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::chapter::{Chapter, ChapterOrder, Point};
use super::origins::SectionOrigins;
use super::source_file::SourceFile;
use crate::errors::{Result, SnippetError};
use crate::readers::SourceReader;

/// Options that affect how files are loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Reject a section pushed in more than one place.
    pub strict_sections: bool,
    /// Prefixes removed from paths to form display paths.
    pub strip_prefixes: Vec<String>,
}

/// All annotated source files, read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct SourceCode {
    files: IndexMap<PathBuf, SourceFile>,
    origins: SectionOrigins,
}

impl SourceCode {
    /// Parses every `(path, contents)` pair, in order.
    ///
    /// Stops at the first file that fails to parse. A path may only be
    /// loaded once.
    pub fn load<I, P, S>(inputs: I, order: &dyn ChapterOrder, options: &LoadOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (P, S)>,
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let mut reader = SourceReader::new(order).strict_sections(options.strict_sections);
        let mut files = IndexMap::new();

        for (path, contents) in inputs {
            let path = path.as_ref();
            let file = reader
                .read(path, contents.as_ref())?
                .with_stripped_prefix(&options.strip_prefixes);
            if files.contains_key(path) {
                return Err(SnippetError::DuplicateFile(path.to_path_buf()));
            }
            files.insert(path.to_path_buf(), file);
        }

        let source = Self {
            files,
            origins: reader.into_origins(),
        };
        tracing::info!(
            "Loaded {} files ({} lines, {} sections)",
            source.len(),
            source.line_count(),
            source.origins.len()
        );
        Ok(source)
    }

    /// Iterates over files in load order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    /// Looks up a file by its relative path.
    pub fn file(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(path)
    }

    /// Where each section was first pushed.
    pub fn origins(&self) -> &SectionOrigins {
        &self.origins
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of content lines across all files.
    pub fn line_count(&self) -> usize {
        self.files.values().map(SourceFile::len).sum()
    }

    /// Returns the text of `path` as of section `number` of `chapter`.
    pub fn split_file(
        &self,
        path: &Path,
        chapter: &Chapter,
        number: u32,
        order: &dyn ChapterOrder,
    ) -> Result<String> {
        let ordinal = order
            .ordinal(chapter)
            .ok_or_else(|| SnippetError::UnknownChapter(chapter.clone()))?;
        self.reconstruct(path, Point::new(ordinal, number))
    }

    /// Returns the text of `path` at `point`.
    pub fn reconstruct(&self, path: &Path, point: Point) -> Result<String> {
        let file = self
            .file(path)
            .ok_or_else(|| SnippetError::FileNotFound(path.to_path_buf()))?;
        Ok(reconstruct_file(file, point))
    }
}

/// Joins the lines of `file` present at `point`, each followed by a newline.
///
/// A parameter list can lose its last parameter in a later section, which
/// leaves a dangling comma before the closing parenthesis. That comma is
/// removed.
pub fn reconstruct_file(file: &SourceFile, point: Point) -> String {
    let mut output = String::new();

    for line in file.lines.iter().filter(|l| l.is_present(point)) {
        if line.text.trim().starts_with(')') && output.ends_with(",\n") {
            output.truncate(output.len() - 2);
            output.push('\n');
        }
        output.push_str(&line.text);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChapterList;
    use crate::test_utils::{chapters, load};
    use pretty_assertions::assert_eq;

    const NESTED: &str = "//> A 1\nX\n//> 2\nY\n//< 2\nZ\n//< A 1\n";

    #[test]
    fn test_reconstruct_nested_sections() {
        let order = chapters();
        let source = load(&[("f.c", NESTED)]);
        let a = Chapter::new("A");

        assert_eq!(
            source.split_file(Path::new("f.c"), &a, 1, &order).unwrap(),
            "X\nZ\n"
        );
        assert_eq!(
            source.split_file(Path::new("f.c"), &a, 2, &order).unwrap(),
            "X\nY\nZ\n"
        );
    }

    #[test]
    fn test_reconstruct_before_and_after_removal() {
        let order = chapters();
        let input = "\
//> A 1
keep();
/* A 1 < B 2
old();
*/
//< A 1
//> B 2
new();
//< B 2
";
        let source = load(&[("f.c", input)]);
        let path = Path::new("f.c");

        assert_eq!(
            source.split_file(path, &Chapter::new("A"), 5, &order).unwrap(),
            "keep();\nold();\n"
        );
        assert_eq!(
            source.split_file(path, &Chapter::new("B"), 2, &order).unwrap(),
            "keep();\nold();\nnew();\n"
        );
        assert_eq!(
            source.split_file(path, &Chapter::new("B"), 3, &order).unwrap(),
            "keep();\nnew();\n"
        );
        assert_eq!(
            source.split_file(path, &Chapter::new("C"), 1, &order).unwrap(),
            "keep();\nnew();\n"
        );
    }

    #[test]
    fn test_trailing_comma_repair() {
        let order = chapters();
        let input = "\
//> A 1
  call(
  foo,
//> B 1
  bar
//< B 1
  )
//< A 1
";
        let source = load(&[("f.c", input)]);
        let path = Path::new("f.c");

        assert_eq!(
            source.split_file(path, &Chapter::new("A"), 1, &order).unwrap(),
            "  call(\n  foo\n  )\n"
        );
        assert_eq!(
            source.split_file(path, &Chapter::new("B"), 1, &order).unwrap(),
            "  call(\n  foo,\n  bar\n  )\n"
        );
    }

    #[test]
    fn test_reconstruct_is_idempotent() {
        let order = chapters();
        let source = load(&[("f.c", NESTED)]);
        let path = Path::new("f.c");
        let a = Chapter::new("A");

        let first = source.split_file(path, &a, 2, &order).unwrap();
        let second = source.split_file(path, &a, 2, &order).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_not_found() {
        let order = chapters();
        let source = load(&[("f.c", NESTED)]);

        let err = source
            .split_file(Path::new("missing.c"), &Chapter::new("A"), 1, &order)
            .unwrap_err();
        assert!(matches!(err, SnippetError::FileNotFound(_)));
    }

    #[test]
    fn test_unknown_query_chapter() {
        let order = chapters();
        let source = load(&[("f.c", NESTED)]);

        let err = source
            .split_file(Path::new("f.c"), &Chapter::new("Zebra"), 1, &order)
            .unwrap_err();
        assert!(matches!(err, SnippetError::UnknownChapter(_)));
    }

    #[test]
    fn test_load_keeps_order_and_display_paths() {
        let order = ChapterList::new(["A"]);
        let options = LoadOptions {
            strip_prefixes: vec!["com/craftinginterpreters/".to_string()],
            ..Default::default()
        };
        let inputs = vec![
            ("com/craftinginterpreters/lox/Lox.java", "//> A 1\nclass Lox {}\n//< A 1\n"),
            ("chunk.h", "//> A 1\n#define CHUNK\n//< A 1\n"),
        ];
        let source = SourceCode::load(inputs, &order, &options).unwrap();

        let paths: Vec<&str> = source.files().map(|f| f.display_path.as_str()).collect();
        assert_eq!(paths, vec!["lox/Lox.java", "chunk.h"]);
        assert_eq!(source.line_count(), 2);
    }

    #[test]
    fn test_load_stops_at_first_error() {
        let order = chapters();
        let inputs = vec![("bad.c", "oops\n"), ("good.c", NESTED)];
        let result = SourceCode::load(inputs, &order, &LoadOptions::default());
        assert!(matches!(result, Err(SnippetError::Marker { .. })));
    }

    #[test]
    fn test_load_rejects_repeated_path() {
        let order = chapters();
        let inputs = vec![
            ("vm.c", "//> A 1\nfirst;\n//< A 1\n"),
            ("vm.c", "//> A 1\nsecond;\n//< A 1\n"),
        ];
        let err = SourceCode::load(inputs, &order, &LoadOptions::default()).unwrap_err();
        match err {
            SnippetError::DuplicateFile(path) => assert_eq!(path, PathBuf::from("vm.c")),
            other => panic!("unexpected error: {}", other),
        }
    }
}
