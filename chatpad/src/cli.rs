//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// chatpad - terminal chat client with named threads and a to-do planner
#[derive(Parser)]
#[command(
    name = "chatpad",
    about = "Terminal chat client with named threads and a to-do planner",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive REPL (default)
    Repl,

    /// Send one prompt and print the reply
    Ask {
        /// Prompt text
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        /// Print the reply at once instead of word by word
        #[arg(long)]
        no_reveal: bool,
    },

    /// Print the resolved configuration as YAML
    Config,
}

/// Location of the log file
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chatpad")
        .join("logs")
        .join("chatpad.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// after_help text pointing at the log file
pub fn generate_after_help() -> String {
    format!("Logs are written to: {}\n", get_log_path().display())
}
