//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "proptree")]
#[command(about = "Parse, query and write Java-style .properties files")]
#[command(version)]
#[command(author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Options file (TOML). Defaults to <config dir>/proptree/options.toml
    #[arg(short, long, global = true)]
    pub options: Option<PathBuf>,

    /// Interpolate ${NAME} from the environment
    #[arg(long, global = true)]
    pub env: bool,

    /// Split trailing `# ...` / `// ...` comments off values
    #[arg(long, global = true)]
    pub inline_comments: bool,

    /// Parse `[a, b]` values into lists
    #[arg(long, global = true)]
    pub inline_lists: bool,

    /// Trim surrounding whitespace from values
    #[arg(long, global = true)]
    pub trim: bool,

    /// Leave ${other.key} references unresolved
    #[arg(long, global = true)]
    pub no_var_refs: bool,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a file and print the value tree
    #[command(visible_alias = "p")]
    Parse {
        /// Properties file
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print the comment attached to each key
    #[command(visible_alias = "c")]
    Comments {
        /// Properties file
        file: PathBuf,
    },

    /// Print the value at a key path
    Get {
        /// Properties file
        file: PathBuf,
        /// Dotted key path, e.g. `top.list[0].name`
        path: String,
    },

    /// Convert a TOML or JSON document to properties text
    Encode {
        /// Input file (.toml or .json)
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Nested tree as JSON
    Json,
    /// Nested tree as TOML
    Toml,
    /// `key=value` lines from the flat map
    Flat,
}
