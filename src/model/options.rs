//! Parser options
//!
//! Plain flags live in [`ParseOptions`] so they can be kept in a TOML file.
//! Hooks (value transform, decode hook) are attached on the
//! [`Parser`](crate::parser::Parser) itself.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default field-name convention for binding.
pub const DEFAULT_TAG_NAME: &str = "properties";

/// Parse and bind options.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ParseOptions {
    /// Strip surrounding whitespace (including the trailing `\n` of
    /// triple-quoted values) from final values.
    pub trim_value: bool,
    /// Interpolate `${NAME}` / `${NAME | default}` from the environment.
    pub parse_env_vars: bool,
    /// Resolve `${other.key}` against keys parsed earlier in the same input.
    pub parse_var_references: bool,
    /// Split trailing `# ...` / `// ...` off one-line values.
    pub allow_inline_comments: bool,
    /// Parse `[a, b, c]` values into lists.
    pub allow_inline_lists: bool,
    /// Accept duration strings like `3s` / `1h30m` when binding `Duration` fields.
    pub parse_time: bool,
    /// Convert strings to bools and numbers when binding.
    pub weakly_typed: bool,
    /// Property-key convention for matching record fields:
    /// `properties` (exact), `kebab` or `camel`.
    pub tag_name: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            trim_value: false,
            parse_env_vars: false,
            parse_var_references: true,
            allow_inline_comments: false,
            allow_inline_lists: false,
            parse_time: false,
            weakly_typed: true,
            tag_name: DEFAULT_TAG_NAME.to_string(),
        }
    }
}

/// How property keys are matched against record field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCase {
    /// Keys must equal the serde field name.
    Exact,
    /// `max-conns` also matches field `max_conns`.
    Kebab,
    /// `maxConns` also matches field `max_conns`.
    Camel,
}

impl FieldCase {
    /// Whether property `key` addresses record field `field`.
    pub fn matches(self, field: &str, key: &str) -> bool {
        if field == key {
            return true;
        }
        match self {
            FieldCase::Exact => false,
            FieldCase::Kebab => field.replace('_', "-") == key,
            FieldCase::Camel => to_camel(field) == key,
        }
    }
}

fn to_camel(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl ParseOptions {
    /// Field matching convention selected by `tag_name`.
    pub fn field_case(&self) -> FieldCase {
        match self.tag_name.to_lowercase().as_str() {
            "kebab" | "kebab-case" => FieldCase::Kebab,
            "camel" | "camelcase" => FieldCase::Camel,
            _ => FieldCase::Exact,
        }
    }

    /// Get the default options file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            })
            .join("proptree")
            .join("options.toml")
    }

    /// Load options from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from `path` if given, else from the default path if it exists,
    /// else return defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
