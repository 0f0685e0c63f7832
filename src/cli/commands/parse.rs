//! Parse command: print the value tree or flat map

use anyhow::Result;
use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::cli::context::Context;
use crate::encoder::Encoder;
use crate::model::{Map, Value};

/// Execute the parse command
pub fn execute(ctx: &Context, file: &Path, format: OutputFormat) -> Result<()> {
    let parser = ctx.parse_file(file)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(parser.value_tree())?),
        OutputFormat::Toml => print!("{}", toml::to_string(&to_toml_table(parser.value_tree()))?),
        OutputFormat::Flat => print!("{}", Encoder::new().encode_flat(parser.flat_map())),
    }
    Ok(())
}

/// TOML has no null; list holes become empty strings.
fn to_toml(value: &Value) -> toml::Value {
    match value {
        Value::Null => toml::Value::String(String::new()),
        Value::String(s) => toml::Value::String(s.clone()),
        Value::List(items) => toml::Value::Array(items.iter().map(to_toml).collect()),
        Value::Map(map) => toml::Value::Table(to_toml_table(map)),
    }
}

fn to_toml_table(map: &Map) -> toml::Table {
    map.iter().map(|(k, v)| (k.clone(), to_toml(v))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_toml_fills_holes() {
        let mut map = Map::new();
        map.insert(
            "list".into(),
            Value::List(vec!["a".into(), Value::Null]),
        );
        let text = toml::to_string(&to_toml_table(&map)).unwrap();
        assert_eq!(text, "list = [\"a\", \"\"]\n");
    }
}
