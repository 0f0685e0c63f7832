//! Core data models for proptree

mod error;
mod options;
pub mod path;
mod value;

pub use error::{Construct, Error, ParseError, Result};
pub use options::{FieldCase, ParseOptions, DEFAULT_TAG_NAME};
pub use path::{KeyPath, Segment};
pub use value::{lookup, lookup_in_map, CommentMap, FlatMap, Map, Value};
