//! Check command implementation.

use crate::errors::Result;
use crate::interface::Context;

/// Options for the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// List every file with its line count.
    pub list_files: bool,
}

/// Loads every annotated file and reports totals.
///
/// Any marker error stops the load and is returned.
pub fn check(ctx: &Context, options: CheckOptions) -> Result<()> {
    print!("{}", render_check(ctx, &options)?);
    Ok(())
}

fn render_check(ctx: &Context, options: &CheckOptions) -> Result<String> {
    let source = ctx.load()?;
    let mut output = String::new();

    if options.list_files {
        for file in source.files() {
            output.push_str(&format!("{:6} {}\n", file.len(), file.display_path));
        }
    }
    output.push_str(&format!(
        "{} files, {} lines, {} sections\n",
        source.len(),
        source.line_count(),
        source.origins().len()
    ));

    Ok(output)
}
