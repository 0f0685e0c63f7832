//! Path utilities

use anyhow::{Context, Result};
use std::path::Path;

/// Check if a file exists and is readable
pub fn check_file_readable(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }
    Ok(())
}

/// Read a properties (or TOML/JSON) file into a string
pub fn read_file(path: &Path) -> Result<String> {
    check_file_readable(path)?;
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Lower-cased file extension, if any
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
