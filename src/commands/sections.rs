//! Sections command implementation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::Result;
use crate::interface::Context;
use crate::model::{Chapter, Location, Section};

/// Options for the sections command.
#[derive(Debug, Clone)]
pub struct SectionsOptions {
    pub chapter: Chapter,
    /// Print JSON instead of a listing.
    pub json: bool,
}

#[derive(Serialize)]
struct SectionReport<'a> {
    chapter: &'a Chapter,
    #[serde(flatten)]
    section: &'a Section,
    location: Location,
}

/// Lists the sections of a chapter.
pub fn sections(ctx: &Context, options: SectionsOptions) -> Result<()> {
    print!("{}", render_sections(ctx, &options)?);
    Ok(())
}

/// Renders the sections of a chapter as a listing or as JSON.
pub fn render_sections(ctx: &Context, options: &SectionsOptions) -> Result<String> {
    let source = ctx.load()?;
    let found = source.sections_with_context(
        &options.chapter,
        &ctx.chapters,
        ctx.config.context_lines,
    )?;
    tracing::info!("{} has {} sections", options.chapter, found.len());

    if options.json {
        return render_json(&options.chapter, &found);
    }

    let mut output = String::new();
    for section in found.values() {
        output.push_str(&format!(
            "{} {} {}",
            options.chapter, section.number, section.display_path
        ));
        let location = section.location();
        if location != Location::Unknown {
            output.push_str(&format!(" ({})", location));
        }
        output.push('\n');

        push_prefixed(&mut output, "   ", &section.context_before);
        push_prefixed(&mut output, "-- ", &section.removed);
        push_prefixed(&mut output, "++ ", &section.added);
        push_prefixed(&mut output, "   ", &section.context_after);
        output.push('\n');
    }

    Ok(output)
}

fn render_json(chapter: &Chapter, found: &BTreeMap<u32, Section>) -> Result<String> {
    let reports: Vec<SectionReport<'_>> = found
        .values()
        .map(|section| SectionReport {
            chapter,
            section,
            location: section.location(),
        })
        .collect();
    let mut json = serde_json::to_string_pretty(&reports)?;
    json.push('\n');
    Ok(json)
}

fn push_prefixed(output: &mut String, prefix: &str, lines: &[String]) {
    for line in lines {
        output.push_str(prefix);
        output.push_str(line);
        output.push('\n');
    }
}
