//! Command execution context

use anyhow::{Context as _, Result};
use colored::Colorize;
use std::path::Path;

use crate::cli::args::Cli;
use crate::model::ParseOptions;
use crate::parser::Parser;
use crate::utils::path::read_file;

/// Common context for command execution
pub struct Context {
    pub options: ParseOptions,
}

impl Context {
    /// Load options (file or defaults), then apply flag overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut options = ParseOptions::load_or_default(cli.options.as_deref())
            .context("Failed to load options file")?;

        if cli.env {
            options.parse_env_vars = true;
        }
        if cli.inline_comments {
            options.allow_inline_comments = true;
        }
        if cli.inline_lists {
            options.allow_inline_lists = true;
        }
        if cli.trim {
            options.trim_value = true;
        }
        if cli.no_var_refs {
            options.parse_var_references = false;
        }

        Ok(Self { options })
    }

    /// Read and parse a properties file
    pub fn parse_file(&self, path: &Path) -> Result<Parser> {
        let content = read_file(path)?;

        let mut parser = Parser::with_options(self.options.clone());
        parser
            .parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(parser)
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }
}
