//! In-memory credential store

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::LazyLock;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{CredentialStore, PasswordCredential};
use crate::error::AuthError;

/// Checked on a lookup miss so unknown emails cost one Argon2 verify too
static UNKNOWN_ACCOUNT: LazyLock<Option<PasswordCredential>> =
    LazyLock::new(|| PasswordCredential::hash("chatpad-unknown-account").ok());

async fn hash_blocking(password: &str) -> Result<PasswordCredential, AuthError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || PasswordCredential::hash(&password))
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
}

/// Verify off the runtime; `None` checks against `UNKNOWN_ACCOUNT` and never matches
async fn verify_blocking(credential: Option<PasswordCredential>, password: &str) -> Result<bool, AuthError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || match credential {
        Some(credential) => credential.verify(&password),
        None => {
            if let Some(unknown) = UNKNOWN_ACCOUNT.as_ref() {
                let _ = unknown.verify(&password);
            }
            false
        }
    })
    .await
    .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Credentials held for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, PasswordCredential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, email: &str, password: &str) -> Result<(), AuthError> {
        debug!(%email, "create: called");
        // Hash outside the write lock
        let credential = hash_blocking(password).await?;

        let mut users = self.users.write().await;
        match users.entry(email.to_string()) {
            Entry::Occupied(_) => {
                debug!(%email, "create: user exists");
                Err(AuthError::UserExists)
            }
            Entry::Vacant(slot) => {
                slot.insert(credential);
                info!(%email, "Account created");
                Ok(())
            }
        }
    }

    async fn verify(&self, email: &str, password: &str) -> Result<(), AuthError> {
        debug!(%email, "verify: called");
        let stored = self.users.read().await.get(email).cloned();

        if verify_blocking(stored, password).await? {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
