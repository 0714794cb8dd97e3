//! chatpad - terminal chat client with named threads and a to-do planner
//!
//! Users sign up and log in against an in-memory credential store, then
//! hold any number of named chat threads against a hosted chat-completion
//! endpoint and keep a simple task list. Nothing is persisted except chats
//! exported by hand.
//!
//! # Modules
//!
//! - [`auth`] - Credential store trait and argon2-hashed in-memory store
//! - [`chat`] - Threads, JSON export and word-by-word reply reveal
//! - [`planner`] - Task list with stable ids and due dates
//! - [`workspace`] - Per-account threads and planner
//! - [`session`] - Per-client login, active thread, view and send flow
//! - [`llm`] - Completion client trait and OpenAI-compatible implementation
//! - [`repl`] - Interactive terminal front end
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod auth;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod planner;
pub mod repl;
pub mod session;
pub mod workspace;

pub use auth::{CredentialStore, InMemoryCredentialStore};
pub use chat::{ChatMessage, ChatThread, Sender};
pub use config::Config;
pub use error::{AuthError, ValidationError};
pub use llm::{CompletionClient, CompletionError};
pub use planner::{Planner, PlannerTask, TaskId};
pub use session::{AppContext, Session, SessionError, SessionResult, View};
pub use workspace::{Workspace, WorkspaceStore};
