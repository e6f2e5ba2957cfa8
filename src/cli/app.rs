//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use shutter::output::OutputMode;

/// shutter - Review snapshot test changes
#[derive(Parser, Debug)]
#[command(
    name = "shutter",
    version,
    about = "Review snapshot test changes",
    long_about = "Accept or reject pending snapshots written by tests.\n\n\
                  Tests write a pending snapshot when there is no accepted baseline \
                  or when their output differs from it. Run without a subcommand \
                  to review them one by one."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Project root (defaults to the nearest directory with a Cargo.toml)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Review pending snapshots interactively (default)
    Review,

    /// Accept every pending snapshot
    AcceptAll,

    /// Reject every pending snapshot
    RejectAll,

    /// List pending snapshots
    List,

    /// Show a pending snapshot and its diff against the baseline
    Show {
        /// Test name or snapshot identifier
        name: String,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let root = cli.root.as_deref();

    match cli.command.unwrap_or(Command::Review) {
        Command::Review => commands::review(root, output_mode),
        Command::AcceptAll => commands::accept_all(root, output_mode),
        Command::RejectAll => commands::reject_all(root, output_mode),
        Command::List => commands::list(root, output_mode),
        Command::Show { name } => commands::show(root, &name, output_mode),
    }
}
