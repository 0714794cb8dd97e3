//! Validation and authentication errors
//!
//! Neither is fatal: the REPL reports them and returns to the prompt with no
//! state changed.

use thiserror::Error;

/// A required field was empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingCredentials,

    #[error("Please enter a message.")]
    EmptyPrompt,

    #[error("Task text cannot be empty.")]
    EmptyTaskText,
}

/// Signup or login was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("User already exists.")]
    UserExists,

    /// Same outcome for unknown email and wrong password
    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hash(String),
}
