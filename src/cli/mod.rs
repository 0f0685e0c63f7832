//! CLI module

pub mod args;
pub mod commands;
pub mod context;
pub mod logging;

pub use args::Cli;
pub use context::Context;
