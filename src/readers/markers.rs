//! Section marker grammar.
//!
//! Annotated source uses line comments to open and close regions of code
//! that belong to a `(chapter, number)` section:
//!
//! ```text
//! //> Chapter Name 2       push a region in a new chapter
//! //> 3                    push a region in the current chapter
//! //< 3                    pop the region pushed by `//> 3`
//! //< Chapter Name 2       pop the region pushed by `//> Chapter Name 2`
//! /* Chapter 1 < Other 2   code in this block comment is added in
//! ...                      `Chapter 1` and removed in `Other 2`
//! /* < 4                   nested block removed at `4` of the same chapter
//! */                       closes the innermost block region
//! ```
//!
//! A marker must start the line; leading whitespace is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::MarkerError;
use crate::model::Chapter;

static BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*/\* (?P<chapter>[A-Za-z\s]+) (?P<number>\d+) < (?P<end_chapter>[A-Za-z\s]+) (?P<end_number>\d+)")
        .unwrap()
});

static BLOCK_SECTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*/\* < (?P<number>\d+)").unwrap());

static BEGIN_SECTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*//> (?P<number>\d+)").unwrap());

static END_SECTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*//< (?P<number>\d+)").unwrap());

static BEGIN_CHAPTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*//> (?P<chapter>[A-Za-z\s]+) (?P<number>\d+)").unwrap()
});

static END_CHAPTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*//< (?P<chapter>[A-Za-z\s]+) (?P<number>\d+)").unwrap()
});

/// A control directive recognized on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// `/* <chapter> <number> < <end chapter> <end number>`
    BlockOpen {
        chapter: Chapter,
        number: u32,
        end_chapter: Chapter,
        end_number: u32,
    },
    /// `/* < <end number>`
    BlockPop { end_number: u32 },
    /// A line that is only `*/`. Only a marker while a block region is open.
    BlockClose,
    /// `//> <number>`
    PushNumber(u32),
    /// `//< <number>`
    PopNumber(u32),
    /// `//> <chapter> <number>`
    PushChapter { chapter: Chapter, number: u32 },
    /// `//< <chapter> <number>`
    PopChapter { chapter: Chapter, number: u32 },
}

impl Marker {
    /// Recognizes the marker on `line`, if any.
    ///
    /// Forms are tried in a fixed order and the first match wins. A line in
    /// marker form whose number does not fit a `u32` is an error, never
    /// content.
    pub fn parse(line: &str) -> Result<Option<Marker>, MarkerError> {
        if let Some(caps) = BLOCK_PATTERN.captures(line) {
            return Ok(Some(Marker::BlockOpen {
                chapter: Chapter::new(&caps["chapter"]),
                number: parse_number(&caps["number"])?,
                end_chapter: Chapter::new(&caps["end_chapter"]),
                end_number: parse_number(&caps["end_number"])?,
            }));
        }

        if let Some(end_number) = capture_number(&BLOCK_SECTION_PATTERN, line)? {
            return Ok(Some(Marker::BlockPop { end_number }));
        }

        if line.trim() == "*/" {
            return Ok(Some(Marker::BlockClose));
        }

        if let Some(number) = capture_number(&BEGIN_SECTION_PATTERN, line)? {
            return Ok(Some(Marker::PushNumber(number)));
        }

        if let Some(number) = capture_number(&END_SECTION_PATTERN, line)? {
            return Ok(Some(Marker::PopNumber(number)));
        }

        if let Some((chapter, number)) = capture_chapter(&BEGIN_CHAPTER_PATTERN, line)? {
            return Ok(Some(Marker::PushChapter { chapter, number }));
        }

        if let Some((chapter, number)) = capture_chapter(&END_CHAPTER_PATTERN, line)? {
            return Ok(Some(Marker::PopChapter { chapter, number }));
        }

        Ok(None)
    }
}

fn parse_number(digits: &str) -> Result<u32, MarkerError> {
    digits
        .parse()
        .map_err(|_| MarkerError::InvalidNumber(digits.to_string()))
}

fn capture_number(pattern: &Regex, line: &str) -> Result<Option<u32>, MarkerError> {
    pattern
        .captures(line)
        .map(|caps| parse_number(&caps["number"]))
        .transpose()
}

fn capture_chapter(pattern: &Regex, line: &str) -> Result<Option<(Chapter, u32)>, MarkerError> {
    let Some(caps) = pattern.captures(line) else {
        return Ok(None);
    };
    let number = parse_number(&caps["number"])?;
    Ok(Some((Chapter::new(&caps["chapter"]), number)))
}
