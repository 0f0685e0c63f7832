//! Encode command: TOML / JSON document to properties text

use anyhow::{bail, Context as _, Result};
use std::path::Path;

use crate::encoder::Encoder;
use crate::model::Value;
use crate::utils::path::{extension, read_file};

/// Execute the encode command
pub fn execute(file: &Path) -> Result<()> {
    let content = read_file(file)?;

    let tree = match extension(file).as_deref() {
        Some("toml") => Value::from(
            toml::from_str::<toml::Value>(&content)
                .with_context(|| format!("Invalid TOML in {}", file.display()))?,
        ),
        Some("json") => Value::from(
            serde_json::from_str::<serde_json::Value>(&content)
                .with_context(|| format!("Invalid JSON in {}", file.display()))?,
        ),
        _ => bail!(
            "Unsupported input {} (expected .toml or .json)",
            file.display()
        ),
    };

    print!("{}", Encoder::new().encode(&tree)?);
    Ok(())
}
