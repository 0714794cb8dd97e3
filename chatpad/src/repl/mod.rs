//! Interactive REPL for chatpad
//!
//! Slash commands for accounts, chats and the planner; any other line is
//! sent as a chat message.

mod command;
mod render;
mod session;

pub use command::{CommandError, ReplCommand, ThreadRef, keep_in_history, parse};
pub use render::TerminalReveal;
pub use session::ReplSession;

use std::sync::Arc;

use eyre::Result;

use crate::auth::InMemoryCredentialStore;
use crate::config::Config;
use crate::llm::create_client;
use crate::session::{AppContext, Session};

/// Run the interactive REPL
///
/// This is the main entry point for `chatpad repl`.
pub async fn run_interactive(config: &Config) -> Result<()> {
    // Validate API key early
    config.validate()?;

    let client = create_client(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?;
    let ctx = AppContext::new(Arc::new(InMemoryCredentialStore::new()), client).with_config(config);

    let mut repl = ReplSession::new(Session::new(Arc::new(ctx)));
    repl.run().await
}
