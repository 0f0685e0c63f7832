//! proptree - Java-style properties parser

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use proptree::cli::args::Commands;
use proptree::cli::commands;
use proptree::cli::logging::init_logging;
use proptree::cli::{Cli, Context};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Encode reads TOML/JSON and needs no parse options
    if let Commands::Encode { file } = &cli.command {
        return commands::encode::execute(file);
    }

    let ctx = Context::from_cli(cli)?;

    match &cli.command {
        Commands::Parse { file, format } => commands::parse::execute(&ctx, file, *format),
        Commands::Comments { file } => commands::comments::execute(&ctx, file),
        Commands::Get { file, path } => commands::get::execute(&ctx, file, path),
        Commands::Encode { file } => commands::encode::execute(file),
    }
}
