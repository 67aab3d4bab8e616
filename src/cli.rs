/// CLI argument definitions for the `tg` command.
///
/// Defines the subcommands and their arguments with the `clap` derive
/// macros; long help text lives in `cli_help`.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::archive::MatchScope;
use crate::cli_help;
use crate::config::Layer;

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(
    name = "tg",
    version,
    about = "Communication graph from a chat workspace export"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Input locations shared by every command that reads the export.
#[derive(Args)]
pub struct InputArgs {
    /// Settings file (default: ./talkgraph.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Export directory holding channel folders (default: data)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// User directory JSON (default: <data-dir>/users.json)
    #[arg(long)]
    pub users: Option<PathBuf>,

    /// Org chart CSV (default: <data-dir>/org_chart.csv)
    #[arg(long)]
    pub org_chart: Option<PathBuf>,

    /// Emails to leave out, one per line (default: <data-dir>/ignore.txt)
    #[arg(long)]
    pub ignore: Option<PathBuf>,

    /// Zero-based org chart column holding the department (default: 1)
    #[arg(long)]
    pub department_column: Option<usize>,

    /// Zero-based org chart column holding the email (default: 4)
    #[arg(long)]
    pub email_column: Option<usize>,
}

impl InputArgs {
    /// The command-line layer of the settings.
    pub fn overrides(&self) -> Layer {
        Layer {
            data_dir: self.data_dir.clone(),
            users: self.users.clone(),
            org_chart: self.org_chart.clone(),
            ignore: self.ignore.clone(),
            department_column: self.department_column,
            email_column: self.email_column,
            ..Layer::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the people and department communication graphs
    #[command(long_about = cli_help::GRAPH)]
    Graph {
        #[command(flatten)]
        input: InputArgs,

        /// Directory for people.csv and departments.csv (default: output)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Keep pairs where one direction exceeds this many words (default: 100)
        #[arg(long, allow_negative_numbers = true)]
        min_words: Option<i64>,

        /// Replace people's names with stable pseudonyms
        #[arg(long)]
        obfuscate: bool,

        /// Skip channels matching this glob (repeatable)
        #[arg(long = "exclude-channel", value_name = "GLOB")]
        exclude_channels: Vec<String>,

        /// Where reply timestamps are looked up: file or channel (default: file)
        #[arg(long, value_enum)]
        match_scope: Option<MatchScope>,

        /// Only count messages since this time (e.g. 6m, 1y, 30d, 2024-01-01)
        #[arg(long)]
        since: Option<String>,

        /// Show only the top N pairs of each table (default: 20)
        #[arg(long, default_value = "20")]
        top: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show run stats (files, messages, replies, date span, elapsed time)
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the people directory with department and inclusion status
    #[command(long_about = cli_help::DIRECTORY)]
    Directory {
        #[command(flatten)]
        input: InputArgs,

        /// Show only people whose threads are scored
        #[arg(long)]
        included_only: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}
