//! CLI command implementations

pub mod comments;
pub mod encode;
pub mod get;
pub mod parse;
