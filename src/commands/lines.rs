//! Lines command implementation.

use std::path::PathBuf;

use super::find_file;
use crate::errors::Result;
use crate::interface::Context;

/// Options for the lines command.
#[derive(Debug, Clone, Default)]
pub struct LinesOptions {
    /// File to dump, by relative or display path.
    pub file: PathBuf,
}

/// Prints every tagged line of a file.
pub fn lines(ctx: &Context, options: LinesOptions) -> Result<()> {
    let source = ctx.load()?;
    let file = find_file(&source, &options.file)?;
    for line in &file.lines {
        println!("{}", line);
    }
    Ok(())
}
