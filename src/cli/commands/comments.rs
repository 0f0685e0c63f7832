//! Comments command: print the comment attached to each key

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::cli::context::Context;

/// Execute the comments command
pub fn execute(ctx: &Context, file: &Path) -> Result<()> {
    let parser = ctx.parse_file(file)?;

    if parser.comments().is_empty() {
        ctx.print_warning("No comments found");
        return Ok(());
    }

    for (key, comment) in parser.comments() {
        println!("{}: {}", key.cyan().bold(), comment.replace('\n', "\n    "));
    }
    Ok(())
}
