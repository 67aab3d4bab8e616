mod archive;
mod cli;
mod cli_help;
mod config;
mod directory;
mod graph;
mod report_helpers;
mod util;
mod walk;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::{Layer, Settings};

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Graph {
            input,
            output_dir,
            min_words,
            obfuscate,
            exclude_channels,
            match_scope,
            since,
            top,
            json,
            verbose,
        } => {
            let overrides = input.overrides().merge(Layer {
                output_dir,
                minimum_word_count: min_words,
                obfuscate_names: obfuscate.then_some(true),
                exclude_channels: (!exclude_channels.is_empty()).then_some(exclude_channels),
                match_scope,
                since,
                ..Layer::default()
            });
            let settings = Settings::load(input.config.as_deref(), overrides)?;
            graph::run(&settings, json, top, verbose)
        }
        Commands::Directory {
            input,
            included_only,
            json,
        } => {
            let settings = Settings::load(input.config.as_deref(), input.overrides())?;
            directory::run(&settings, json, included_only)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tg", &mut io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Graph { verbose: true, .. });
    init_tracing(verbose);

    if let Err(err) = dispatch(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
