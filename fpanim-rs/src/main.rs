//! Main entry point for the fpanim-rs CLI

mod cli;
mod commands;
mod utils;

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use std::io;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger; RUST_LOG overrides the verbosity flags
    let default_filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Execute command
    match cli.command {
        Commands::Info { file, detailed } => commands::inspect::execute_info(&file, detailed),
        Commands::Validate { file, strict } => commands::inspect::execute_validate(&file, strict),
        Commands::Sample { file, at, json } => commands::playback::execute_sample(&file, &at, json),
        Commands::Sounds { file, step } => commands::playback::execute_sounds(&file, step),
        Commands::Format { input, output } => {
            commands::format::execute(&input, output.as_deref())
        }
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
