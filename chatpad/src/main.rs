//! chatpad - terminal chat client with named threads and a to-do planner
//!
//! CLI entry point.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches};
use eyre::{Context, Result};
use tracing::{debug, info};

use chatpad::chat::{self, RevealFrame, RevealSink};
use chatpad::cli::{Cli, Command, generate_after_help};
use chatpad::config::Config;
use chatpad::llm::create_client;
use chatpad::repl;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chatpad")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("chatpad.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(model = %config.llm.model, "chatpad loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Repl) | None => repl::run_interactive(&config).await,
        Some(Command::Ask { prompt, no_reveal }) => cmd_ask(&config, &prompt.join(" "), no_reveal).await,
        Some(Command::Config) => cmd_config(&config),
    }
}

/// Send one prompt and print the reply
async fn cmd_ask(config: &Config, prompt: &str, no_reveal: bool) -> Result<()> {
    debug!(prompt_len = prompt.len(), no_reveal, "cmd_ask: called");
    if prompt.trim().is_empty() {
        return Err(eyre::eyre!("Please enter a message."));
    }
    config.validate()?;

    let client = create_client(&config.llm).context("Failed to create LLM client")?;
    let reply = client.complete(prompt).await.context("Completion failed")?;

    if no_reveal {
        println!("{reply}");
        return Ok(());
    }

    let mut sink = PlainReveal;
    chat::replay(&reply, config.reveal.delay(), &mut sink).await;
    Ok(())
}

/// Reveal without the speaker label
struct PlainReveal;

impl RevealSink for PlainReveal {
    fn frame(&mut self, frame: RevealFrame<'_>) {
        print!("{}", frame.delta);
        let _ = io::stdout().flush();
    }

    fn finish(&mut self) {
        println!();
    }
}

/// Print the resolved configuration
fn cmd_config(config: &Config) -> Result<()> {
    debug!("cmd_config: called");
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config")?;
    print!("{yaml}");
    Ok(())
}
