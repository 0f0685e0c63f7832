//! Get command: print the value at a key path

use anyhow::{bail, Result};
use std::path::Path;

use crate::cli::context::Context;
use crate::model::Value;

/// Execute the get command
pub fn execute(ctx: &Context, file: &Path, path: &str) -> Result<()> {
    let parser = ctx.parse_file(file)?;

    match parser.get(path) {
        None => bail!("key not found: {}", path),
        Some(Value::Null) => println!(),
        Some(Value::String(s)) => println!("{}", s),
        Some(node) => println!("{}", serde_json::to_string_pretty(node)?),
    }
    Ok(())
}
