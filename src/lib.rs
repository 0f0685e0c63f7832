//! proptree - Java-style properties parser
//!
//! Parses `.properties` text into a nested value tree and back.
//!
//! # Features
//!
//! - Dotted and indexed keys (`top.list[0].name`) build nested maps and lists
//! - `#`, `!`, `//` and `/* ... */` comments, collected per key
//! - Triple-quoted (`'''` / `"""`) and backslash-continued multi-line values
//! - `${other.key}` references and `${ENV_NAME | default}` interpolation
//! - Optional inline comments and inline lists (`[a, b, c]`)
//! - Binding onto any `serde::Deserialize` type, with pluggable decode hooks
//! - Encoding trees, flat maps and `Serialize` records back to text
//!
//! # Example
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct App {
//!     name: String,
//!     debug: bool,
//!     ports: Vec<u16>,
//! }
//!
//! let app: App = proptree::from_str("
//! name = demo
//! debug = true
//! ports[0] = 8080
//! ports[1] = 8081
//! ").unwrap();
//!
//! assert_eq!(app.ports, vec![8080, 8081]);
//! ```

pub mod binder;
pub mod cli;
pub mod encoder;
pub mod model;
pub mod parser;
pub mod utils;

pub use binder::{BindError, Coerced, DecodeHook, SourceKind, StandardHook, TargetKind};
pub use encoder::{EncodeError, Encoder};
pub use model::{
    CommentMap, Error, FieldCase, FlatMap, KeyPath, Map, ParseError, ParseOptions, Result, Value,
};
pub use parser::Parser;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parse `text` with `options`.
pub fn parse(text: &str, options: ParseOptions) -> std::result::Result<Parser, ParseError> {
    let mut parser = Parser::with_options(options);
    parser.parse(text)?;
    Ok(parser)
}

/// Parse `text` with default options and bind the whole tree onto `T`.
pub fn from_str<T: DeserializeOwned>(text: &str) -> Result<T> {
    Parser::new().unmarshal(text)
}

/// Encode a record or map as properties text.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(Encoder::new().encode_serialize(value)?)
}
