//! Session error types

use thiserror::Error;

use crate::chat::ExportError;
use crate::error::{AuthError, ValidationError};
use crate::llm::CompletionError;
use crate::planner::TaskId;

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Please log in first.")]
    NotLoggedIn,

    #[error("Already logged in as {0}. Log out first.")]
    AlreadyLoggedIn(String),

    #[error("Start a new chat to begin.")]
    NoActiveThread,

    #[error("No chat named '{0}'")]
    ThreadNotFound(String),

    #[error("No chat at position {0}")]
    NoThreadAt(usize),

    #[error("No task at position {0}")]
    NoTaskAt(usize),

    #[error("Task {0} not found")]
    TaskNotFound(TaskId),

    #[error("Nothing to retry yet.")]
    NothingToRetry,
}

/// Response from session operations
pub type SessionResult<T> = Result<T, SessionError>;
