//! Account credentials
//!
//! `CredentialStore` is the seam between login/signup and wherever
//! credentials live. The only implementation keeps them in memory for the
//! lifetime of the process.

mod memory;
mod password;

pub use memory::InMemoryCredentialStore;
pub use password::PasswordCredential;

use async_trait::async_trait;

use crate::error::AuthError;

/// Create and verify account credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Register a new account
    ///
    /// Fails with `AuthError::UserExists` if the email is already taken.
    async fn create(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Check an email/password pair
    ///
    /// Unknown email and wrong password both fail with
    /// `AuthError::InvalidCredentials`.
    async fn verify(&self, email: &str, password: &str) -> Result<(), AuthError>;
}
