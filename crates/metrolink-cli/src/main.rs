#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::uninlined_format_args)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "metrolink")]
#[command(author, version, about = "Metro resolver config for locally linked packages", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Synthesize the Metro resolver config for the project
    Config {
        /// Skip workspace member discovery
        #[arg(long)]
        no_workspaces: bool,

        /// Explicit linked package as NAME=PATH (repeatable; skips auto-detection)
        #[arg(long = "package", value_name = "NAME=PATH")]
        packages: Vec<String>,

        /// Additional peer dependency to always include (repeatable)
        #[arg(long = "peer", value_name = "NAME")]
        peers: Vec<String>,
    },

    /// List linked packages found in the root manifest's dependency fields
    Packages,

    /// List workspace member packages
    Workspaces,

    /// Detect the package manager from lockfile presence
    Detect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    logging::init(cli.verbose, cli.json);

    match cli.command {
        Some(Commands::Config {
            no_workspaces,
            packages,
            peers,
        }) => commands::config::run(&cwd, no_workspaces, &packages, &peers, cli.json),
        Some(Commands::Packages) => commands::packages::run(&cwd, cli.json),
        Some(Commands::Workspaces) => commands::workspaces::run(&cwd, cli.json),
        Some(Commands::Detect) => commands::detect::run(&cwd, cli.json),
        Some(Commands::Version) | None => commands::version::run(),
    }
}
