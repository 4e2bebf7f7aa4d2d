//! Sections: the lines one chapter step adds and removes, with context.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::chapter::{Chapter, ChapterOrder, Point};
use super::origins::UNWRITTEN_SECTION;
use super::source_code::SourceCode;
use super::source_file::SourceFile;
use crate::errors::{Result, SnippetError};

/// Maximum number of context lines shown on each side of a section.
pub const CONTEXT_LINES: usize = 5;

/// The change made by one numbered step of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Relative path of the file the section belongs to.
    pub file: PathBuf,
    pub display_path: String,
    pub language: String,
    pub number: u32,
    /// Present lines just before the section, in file order.
    pub context_before: Vec<String>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    /// Present lines just after the section, in file order.
    pub context_after: Vec<String>,
    /// Routine of the first added line that has one.
    pub routine: Option<String>,
    /// Routine of the nearest preceding context line that has one.
    pub preceding_routine: Option<String>,
}

/// Where a section goes in its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "routine", rename_all = "snake_case")]
pub enum Location {
    /// Nothing comes before it, so the section starts a new file.
    NewFile,
    /// The section adds a new routine after this one.
    AfterRoutine(String),
    /// The section changes the body of this routine.
    InRoutine(String),
    Unknown,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::NewFile => write!(f, "create new file"),
            Location::AfterRoutine(name) => write!(f, "add after {}()", name),
            Location::InRoutine(name) => write!(f, "in {}()", name),
            Location::Unknown => Ok(()),
        }
    }
}

impl Section {
    fn new(file: &SourceFile, number: u32) -> Self {
        Self {
            file: file.path.clone(),
            display_path: file.display_path.clone(),
            language: file.language().to_string(),
            number,
            context_before: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
            context_after: Vec::new(),
            routine: None,
            preceding_routine: None,
        }
    }

    /// Describes where in the file this section appears.
    pub fn location(&self) -> Location {
        if self.context_before.is_empty() {
            return Location::NewFile;
        }
        match (&self.routine, &self.preceding_routine) {
            (Some(routine), Some(preceding)) if routine == preceding => {
                Location::InRoutine(routine.clone())
            }
            (Some(_), Some(preceding)) => Location::AfterRoutine(preceding.clone()),
            _ => Location::Unknown,
        }
    }
}

/// A section being collected, with the span of lines it covers.
struct Draft {
    section: Section,
    first: usize,
    last: usize,
}

impl SourceCode {
    /// Finds every section of `chapter`, keyed by section number.
    pub fn sections(
        &self,
        chapter: &Chapter,
        order: &dyn ChapterOrder,
    ) -> Result<BTreeMap<u32, Section>> {
        self.sections_with_context(chapter, order, CONTEXT_LINES)
    }

    /// Like [`SourceCode::sections`] with a custom context size.
    pub fn sections_with_context(
        &self,
        chapter: &Chapter,
        order: &dyn ChapterOrder,
        context_lines: usize,
    ) -> Result<BTreeMap<u32, Section>> {
        let ordinal = order
            .ordinal(chapter)
            .ok_or_else(|| SnippetError::UnknownChapter(chapter.clone()))?;

        let mut drafts: BTreeMap<u32, Draft> = BTreeMap::new();

        for file in self.files() {
            for (index, line) in file.lines.iter().enumerate() {
                if line.start.chapter == *chapter {
                    let draft = ensure_draft(&mut drafts, chapter, file, line.start.number, index)?;
                    draft.section.added.push(line.text.clone());
                    if draft.section.routine.is_none() {
                        draft.section.routine = line.routine.clone();
                    }
                }

                if let Some(end) = line.end.as_ref().filter(|e| e.chapter == *chapter) {
                    let draft = ensure_draft(&mut drafts, chapter, file, end.number, index)?;
                    draft.section.removed.push(line.text.clone());
                }
            }
        }

        let mut sections = BTreeMap::new();
        for (number, draft) in drafts {
            let Draft {
                mut section,
                first,
                last,
            } = draft;
            if let Some(file) = self.file(&section.file) {
                let point = Point::new(ordinal, number);
                fill_context(&mut section, file, first, last, point, context_lines);
            }
            tracing::debug!(
                "{} {}: {} added, {} removed in {}",
                chapter,
                number,
                section.added.len(),
                section.removed.len(),
                section.display_path
            );
            sections.insert(number, section);
        }

        Ok(sections)
    }
}

/// Returns the draft for `number`, creating it at `index` of `file`.
///
/// Only the unwritten section may collect lines from more than one file.
/// Its span stays in the file that created it.
fn ensure_draft<'d>(
    drafts: &'d mut BTreeMap<u32, Draft>,
    chapter: &Chapter,
    file: &SourceFile,
    number: u32,
    index: usize,
) -> Result<&'d mut Draft> {
    match drafts.entry(number) {
        Entry::Vacant(entry) => Ok(entry.insert(Draft {
            section: Section::new(file, number),
            first: index,
            last: index,
        })),
        Entry::Occupied(entry) => {
            let draft = entry.into_mut();
            if draft.section.file != file.path {
                if number != UNWRITTEN_SECTION {
                    return Err(SnippetError::DuplicateSection {
                        chapter: chapter.clone(),
                        number,
                        first: draft.section.file.clone(),
                        second: file.path.clone(),
                    });
                }
            } else {
                draft.last = index;
            }
            Ok(draft)
        }
    }
}

/// Collects up to `limit` present lines on each side of `first..=last`.
fn fill_context(
    section: &mut Section,
    file: &SourceFile,
    first: usize,
    last: usize,
    point: Point,
    limit: usize,
) {
    let mut before = Vec::new();
    for line in file.lines[..first].iter().rev() {
        if before.len() >= limit {
            break;
        }
        if line.is_present(point) {
            before.push(line.text.clone());
            if section.preceding_routine.is_none() {
                section.preceding_routine = line.routine.clone();
            }
        }
    }
    before.reverse();
    section.context_before = before;

    section.context_after = file.lines[last + 1..]
        .iter()
        .filter(|l| l.is_present(point))
        .take(limit)
        .map(|l| l.text.clone())
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{chapters, load};
    use pretty_assertions::assert_eq;

    fn a() -> Chapter {
        Chapter::new("A")
    }

    #[test]
    fn test_added_and_removed_lines() {
        let input = "\
//> A 1
static void run() {
  keep();
/* A 1 < B 2
  old();
*/
//< A 1
//> B 2
  new();
//< B 2
//> A 1
}
//< A 1
";
        let source = load(&[("vm.c", input)]);
        let sections = source.sections(&Chapter::new("B"), &chapters()).unwrap();

        assert_eq!(sections.len(), 1);
        let section = &sections[&2];
        assert_eq!(section.added, vec!["  new();"]);
        assert_eq!(section.removed, vec!["  old();"]);
        assert_eq!(section.context_before, vec!["static void run() {", "  keep();"]);
        assert_eq!(section.context_after, vec!["}"]);
        assert_eq!(section.routine.as_deref(), Some("run"));
        assert_eq!(section.location(), Location::InRoutine("run".to_string()));
    }

    #[test]
    fn test_context_is_bounded() {
        let mut input = String::from("//> A 1\n");
        for i in 0..8 {
            input.push_str(&format!("before{};\n", i));
        }
        input.push_str("//> 2\nadded;\n//< 2\n");
        for i in 0..8 {
            input.push_str(&format!("after{};\n", i));
        }
        input.push_str("//< A 1\n");

        let source = load(&[("f.c", input.as_str())]);
        let sections = source.sections(&a(), &chapters()).unwrap();
        let section = &sections[&2];

        assert_eq!(
            section.context_before,
            vec!["before3;", "before4;", "before5;", "before6;", "before7;"]
        );
        assert_eq!(
            section.context_after,
            vec!["after0;", "after1;", "after2;", "after3;", "after4;"]
        );
    }

    #[test]
    fn test_custom_context_size() {
        let source = load(&[("f.c", "//> A 1\na;\nb;\n//> 2\nc;\n//< 2\nd;\ne;\n//< A 1\n")]);
        let sections = source
            .sections_with_context(&a(), &chapters(), 1)
            .unwrap();

        assert_eq!(sections[&2].context_before, vec!["b;"]);
        assert_eq!(sections[&2].context_after, vec!["d;"]);
    }

    #[test]
    fn test_context_skips_absent_lines() {
        let input = "\
//> A 1
one;
//> 3
later;
//< 3
//> 2
two;
//< 2
//< A 1
";
        let source = load(&[("f.c", input)]);
        let sections = source.sections(&a(), &chapters()).unwrap();

        // `later;` belongs to section 3 and is absent at section 2.
        assert_eq!(sections[&2].context_before, vec!["one;"]);
        assert_eq!(sections[&3].context_after, vec!["two;"]);
        assert_eq!(sections[&1].added, vec!["one;"]);
    }

    #[test]
    fn test_new_file_location() {
        let source = load(&[("f.c", "//> A 1\nint x;\n//< A 1\n")]);
        let sections = source.sections(&a(), &chapters()).unwrap();
        assert_eq!(sections[&1].location(), Location::NewFile);
    }

    #[test]
    fn test_after_routine_location() {
        let input = "\
//> A 1
void first() {
}
//> 2
void second() {
}
//< 2
//< A 1
";
        let source = load(&[("f.c", input)]);
        let sections = source.sections(&a(), &chapters()).unwrap();
        let section = &sections[&2];

        assert_eq!(section.preceding_routine.as_deref(), Some("first"));
        assert_eq!(section.location(), Location::AfterRoutine("first".to_string()));
        assert_eq!(section.location().to_string(), "add after first()");
    }

    #[test]
    fn test_duplicate_section_across_files() {
        let source = load(&[
            ("a.c", "//> A 5\nx;\n//< A 5\n"),
            ("b.c", "//> A 5\ny;\n//< A 5\n"),
        ]);
        let err = source.sections(&a(), &chapters()).unwrap_err();

        match err {
            SnippetError::DuplicateSection {
                number,
                first,
                second,
                ..
            } => {
                assert_eq!(number, 5);
                assert_eq!(first, PathBuf::from("a.c"));
                assert_eq!(second, PathBuf::from("b.c"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unwritten_section_may_span_files() {
        let source = load(&[
            ("a.c", "//> A 99\nx;\n//< A 99\n"),
            ("b.c", "//> A 99\ny;\n//< A 99\n"),
        ]);
        let sections = source.sections(&a(), &chapters()).unwrap();

        let section = &sections[&99];
        assert_eq!(section.file, PathBuf::from("a.c"));
        assert_eq!(section.added, vec!["x;", "y;"]);
    }

    #[test]
    fn test_chapter_without_sections() {
        let source = load(&[("f.c", "//> A 1\nx;\n//< A 1\n")]);
        let sections = source.sections(&Chapter::new("C"), &chapters()).unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_section_with_only_removed_lines() {
        let input = "\
//> A 1
keep;
/* A 1 < B 4
old;
*/
tail;
//< A 1
";
        let source = load(&[("f.c", input)]);
        let sections = source.sections(&Chapter::new("B"), &chapters()).unwrap();

        assert_eq!(sections.len(), 1);
        let section = &sections[&4];
        assert!(section.added.is_empty());
        assert_eq!(section.removed, vec!["old;"]);
        assert_eq!(section.context_before, vec!["keep;"]);
        assert_eq!(section.context_after, vec!["tail;"]);
        assert_eq!(section.location(), Location::Unknown);
    }

    #[test]
    fn test_unknown_location_without_routines() {
        let source = load(&[("f.c", "//> A 1\nx = 1;\n//> 2\ny = 2;\n//< 2\n//< A 1\n")]);
        let sections = source.sections(&a(), &chapters()).unwrap();
        let section = &sections[&2];

        assert_eq!(section.context_before, vec!["x = 1;"]);
        assert_eq!(section.routine, None);
        assert_eq!(section.preceding_routine, None);
        assert_eq!(section.location(), Location::Unknown);
        assert_eq!(section.location().to_string(), "");
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::NewFile.to_string(), "create new file");
        assert_eq!(Location::InRoutine("main".into()).to_string(), "in main()");
        assert_eq!(Location::Unknown.to_string(), "");
    }
}
