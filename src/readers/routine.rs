//! Best-effort detection of the routine enclosing each line.
//!
//! This is a heuristic. It looks for a `TYPE NAME(` shape and a closing brace
//! at the indentation routines are written at, so unusual formatting can
//! make it miss a declaration or end a routine early.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::SourceKind;

/// Matches a method or function declaration such as `static void run(`.
static DECLARATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<type>\w+)>* (?P<name>\w+)\(").unwrap());

/// Words that can sit where a return type goes without declaring anything.
const KEYWORDS: &[&str] = &["new", "return"];

/// Strategy for tracking which routine a line belongs to.
pub trait RoutineDetector {
    /// Returns the routine name if `line` declares one.
    fn declaration(&self, line: &str) -> Option<String>;

    /// Whether `line` closes the current routine.
    fn is_end(&self, line: &str) -> bool;
}

/// Declaration-shape heuristic tuned per source kind.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationHeuristic {
    kind: SourceKind,
}

impl DeclarationHeuristic {
    pub fn new(kind: SourceKind) -> Self {
        Self { kind }
    }
}

impl RoutineDetector for DeclarationHeuristic {
    fn declaration(&self, line: &str) -> Option<String> {
        // Comments and string literals produce too many false matches.
        if line.contains("//") || line.contains('"') {
            return None;
        }
        let caps = DECLARATION_PATTERN.captures(line)?;
        if KEYWORDS.contains(&&caps["type"]) {
            return None;
        }
        Some(caps["name"].to_string())
    }

    fn is_end(&self, line: &str) -> bool {
        match self.kind {
            // Methods are indented one level inside their class.
            SourceKind::Java => line == "  }",
            SourceKind::C => line == "}",
            SourceKind::Other => false,
        }
    }
}
