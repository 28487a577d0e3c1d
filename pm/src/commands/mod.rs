mod completions;
mod init;
mod merge;
mod rename;

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use init::InitCommand;
use merge::MergeCommand;
use rename::RenameCommand;

/// Extension trait for exiting on configuration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for plugmerge_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "plugmerge")]
#[command(version)]
#[command(about = "Merge a multi-file Oxide/uMod plugin into a single C# file")]
pub(crate) struct Cli {
    /// Log filter, e.g. `info` or `plugmerge_codegen=debug` (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Shorthand for `--log-level debug`
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn log_filter(&self) -> String {
        if self.verbose {
            "debug".to_string()
        } else {
            self.log_level.clone()
        }
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Merge(cmd) => cmd.run(),
            Commands::Rename(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default merge configuration
    Init(InitCommand),

    /// Merge plugin sources into a single file
    Merge(MergeCommand),

    /// Rename the plugin class declared in a file
    Rename(RenameCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
