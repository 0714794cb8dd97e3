//! Per-client session state
//!
//! A `Session` is the state of one interactive client: who is logged in,
//! which chat is active and which view is shown. Shared services live in
//! `AppContext`; every session gets its own `Session`, and account data is
//! reached only through the logged-in account's workspace.
//!
//! # Sending a message
//!
//! ```text
//! Idle ──(non-blank prompt)──> Sending ──ok──> Succeeded ──> Idle
//!                                 └────err──> Failed ────> Idle
//! ```
//!
//! The user turn is appended on entering `Sending`. `Succeeded` appends the
//! Bot turn after the reveal; `Failed` appends nothing more, so the thread
//! keeps a user turn without a reply.

mod error;

pub use error::{SessionError, SessionResult};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::auth::CredentialStore;
use crate::chat::{self, ChatMessage, RevealSink, Sender};
use crate::config::Config;
use crate::error::ValidationError;
use crate::llm::CompletionClient;
use crate::planner::{PlannerTask, TaskId};
use crate::workspace::{WorkspaceHandle, WorkspaceStore};

/// Which screen is shown after login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Chat,
    Planner,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Chat => write!(f, "chat"),
            View::Planner => write!(f, "planner"),
        }
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chat" => Ok(View::Chat),
            "planner" | "plan" | "tasks" => Ok(View::Planner),
            other => Err(format!("Unknown view: {other} (expected chat or planner)")),
        }
    }
}

/// Services shared by every session in the process
pub struct AppContext {
    pub credentials: Arc<dyn CredentialStore>,
    pub workspaces: WorkspaceStore,
    pub client: Arc<dyn CompletionClient>,
    pub reveal_delay: Duration,
    pub export_dir: PathBuf,
}

impl AppContext {
    pub fn new(credentials: Arc<dyn CredentialStore>, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            credentials,
            workspaces: WorkspaceStore::new(),
            client,
            reveal_delay: Duration::ZERO,
            export_dir: PathBuf::from("."),
        }
    }

    /// Apply reveal pacing and export location from config
    pub fn with_config(mut self, config: &Config) -> Self {
        self.reveal_delay = config.reveal.delay();
        self.export_dir = config.export.dir.clone();
        self
    }
}

struct Account {
    email: String,
    workspace: WorkspaceHandle,
}

/// State of one interactive client
pub struct Session {
    ctx: Arc<AppContext>,
    account: Option<Account>,
    active_thread: Option<String>,
    view: View,
    last_prompt: Option<String>,
}

impl Session {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            account: None,
            active_thread: None,
            view: View::default(),
            last_prompt: None,
        }
    }

    // === Authentication ===

    /// Register a new account; does not log in
    pub async fn signup(&self, email: &str, password: &str) -> SessionResult<()> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }
        self.ctx.credentials.create(email, password).await?;
        Ok(())
    }

    pub async fn login(&mut self, email: &str, password: &str) -> SessionResult<()> {
        if let Some(account) = &self.account {
            return Err(SessionError::AlreadyLoggedIn(account.email.clone()));
        }

        let email = email.trim();
        self.ctx.credentials.verify(email, password).await?;

        let workspace = self.ctx.workspaces.open(email).await;
        self.account = Some(Account {
            email: email.to_string(),
            workspace,
        });
        self.active_thread = None;
        self.view = View::Chat;
        info!(%email, "Logged in");
        Ok(())
    }

    /// Forget who is logged in; the account's threads and tasks are kept
    pub fn logout(&mut self) -> Option<String> {
        let account = self.account.take()?;
        self.active_thread = None;
        self.view = View::default();
        self.last_prompt = None;
        info!(email = %account.email, "Logged out");
        Some(account.email)
    }

    pub fn is_logged_in(&self) -> bool {
        self.account.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.email.as_str())
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) -> SessionResult<()> {
        self.workspace()?;
        self.view = view;
        Ok(())
    }

    fn workspace(&self) -> SessionResult<&WorkspaceHandle> {
        self.account.as_ref().map(|a| &a.workspace).ok_or(SessionError::NotLoggedIn)
    }

    // === Chat threads ===

    /// Create a new empty thread and make it active
    pub async fn create_thread(&mut self) -> SessionResult<String> {
        let name = {
            let mut ws = self.workspace()?.lock().await;
            ws.threads.create().name().to_string()
        };
        debug!(%name, "create_thread: now active");
        self.active_thread = Some(name.clone());
        Ok(name)
    }

    pub async fn select_thread(&mut self, name: &str) -> SessionResult<()> {
        let exists = self.workspace()?.lock().await.threads.contains(name);
        if !exists {
            return Err(SessionError::ThreadNotFound(name.to_string()));
        }
        self.active_thread = Some(name.to_string());
        Ok(())
    }

    /// Select the thread at a 1-based position in the listing
    pub async fn select_thread_at(&mut self, position: usize) -> SessionResult<String> {
        let name = {
            let ws = self.workspace()?.lock().await;
            ws.threads.nth(position).map(|t| t.name().to_string())
        };
        let name = name.ok_or(SessionError::NoThreadAt(position))?;
        self.active_thread = Some(name.clone());
        Ok(name)
    }

    /// Thread names in creation order
    pub async fn thread_names(&self) -> SessionResult<Vec<String>> {
        let ws = self.workspace()?.lock().await;
        Ok(ws.threads.iter().map(|t| t.name().to_string()).collect())
    }

    pub fn active_thread(&self) -> Option<&str> {
        self.active_thread.as_deref()
    }

    fn require_active_thread(&self) -> SessionResult<String> {
        self.workspace()?;
        self.active_thread.clone().ok_or(SessionError::NoActiveThread)
    }

    pub async fn messages(&self, thread: &str) -> SessionResult<Vec<ChatMessage>> {
        let ws = self.workspace()?.lock().await;
        ws.threads
            .get(thread)
            .map(|t| t.messages().to_vec())
            .ok_or_else(|| SessionError::ThreadNotFound(thread.to_string()))
    }

    pub async fn active_messages(&self) -> SessionResult<Vec<ChatMessage>> {
        let thread = self.require_active_thread()?;
        self.messages(&thread).await
    }

    /// Append to a thread, returning its new message count
    pub async fn append_message(&self, thread: &str, sender: Sender, text: &str) -> SessionResult<usize> {
        let mut ws = self.workspace()?.lock().await;
        ws.threads
            .append(thread, sender, text)
            .ok_or_else(|| SessionError::ThreadNotFound(thread.to_string()))
    }

    /// Send a prompt on the active thread and reveal the reply into `sink`
    ///
    /// Returns the reply on success. On a completion failure the user turn
    /// stays in the thread and the error is returned.
    pub async fn send(&mut self, prompt: &str, sink: &mut dyn RevealSink) -> SessionResult<String> {
        if prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt.into());
        }
        let thread = self.require_active_thread()?;

        self.append_message(&thread, Sender::You, prompt).await?;
        self.last_prompt = Some(prompt.to_string());
        debug!(%thread, prompt_len = prompt.len(), "send: sending");

        let reply = match self.ctx.client.complete(prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(%thread, error = %e, "Completion failed");
                return Err(e.into());
            }
        };

        chat::replay(&reply, self.ctx.reveal_delay, sink).await;
        self.append_message(&thread, Sender::Bot, &reply).await?;
        debug!(%thread, reply_len = reply.len(), "send: succeeded");
        Ok(reply)
    }

    /// Send the last prompt again
    pub async fn retry(&mut self, sink: &mut dyn RevealSink) -> SessionResult<String> {
        let prompt = self.last_prompt.clone().ok_or(SessionError::NothingToRetry)?;
        self.send(&prompt, sink).await
    }

    pub fn last_prompt(&self) -> Option<&str> {
        self.last_prompt.as_deref()
    }

    /// Directory `export_active` writes into
    pub fn export_dir(&self) -> &Path {
        &self.ctx.export_dir
    }

    /// Write the active thread to the export directory
    pub async fn export_active(&self) -> SessionResult<PathBuf> {
        let name = self.require_active_thread()?;
        let thread = {
            let ws = self.workspace()?.lock().await;
            ws.threads
                .get(&name)
                .cloned()
                .ok_or_else(|| SessionError::ThreadNotFound(name.clone()))?
        };
        Ok(chat::save_thread(&self.ctx.export_dir, &thread)?)
    }

    // === Planner ===

    pub async fn add_task(&self, text: &str, due: Option<NaiveDate>) -> SessionResult<TaskId> {
        let mut ws = self.workspace()?.lock().await;
        Ok(ws.planner.add_task(text, due)?.id)
    }

    /// Resolve a 1-based listing position to a task id
    pub async fn task_id_at(&self, position: usize) -> SessionResult<TaskId> {
        let ws = self.workspace()?.lock().await;
        ws.planner.id_at(position).ok_or(SessionError::NoTaskAt(position))
    }

    /// Flip a task's done flag, returning the new value
    pub async fn toggle_task(&self, id: TaskId) -> SessionResult<bool> {
        let mut ws = self.workspace()?.lock().await;
        ws.planner.toggle_done(id).ok_or(SessionError::TaskNotFound(id))
    }

    pub async fn delete_task(&self, id: TaskId) -> SessionResult<PlannerTask> {
        let mut ws = self.workspace()?.lock().await;
        ws.planner.delete_task(id).ok_or(SessionError::TaskNotFound(id))
    }

    pub async fn tasks(&self) -> SessionResult<Vec<PlannerTask>> {
        let ws = self.workspace()?.lock().await;
        Ok(ws.planner.tasks().to_vec())
    }
}
