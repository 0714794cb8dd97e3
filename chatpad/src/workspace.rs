//! Per-account chat threads and planner
//!
//! Each account owns one `Workspace`. Sessions look theirs up by email at
//! login, so one user's threads and tasks are never visible to another.
//! Workspaces outlive logout and are dropped only with the process.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::chat::ThreadBook;
use crate::planner::Planner;

/// One account's data
#[derive(Debug, Default)]
pub struct Workspace {
    pub threads: ThreadBook,
    pub planner: Planner,
}

/// Shared handle to an account's workspace
pub type WorkspaceHandle = Arc<Mutex<Workspace>>;

/// Workspaces keyed by account email
#[derive(Debug, Default)]
pub struct WorkspaceStore {
    workspaces: Mutex<HashMap<String, WorkspaceHandle>>,
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the account's workspace, creating an empty one on first use
    pub async fn open(&self, email: &str) -> WorkspaceHandle {
        let mut workspaces = self.workspaces.lock().await;
        workspaces
            .entry(email.to_string())
            .or_insert_with(|| {
                debug!(%email, "open: new workspace");
                Arc::new(Mutex::new(Workspace::default()))
            })
            .clone()
    }

    pub async fn len(&self) -> usize {
        self.workspaces.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.workspaces.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_returns_same_workspace_for_same_email() {
        let store = WorkspaceStore::new();

        let first = store.open("a@x.com").await;
        first.lock().await.planner.add_task("shared", None).unwrap();

        let again = store.open("a@x.com").await;
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.lock().await.planner.len(), 1);
    }

    #[tokio::test]
    async fn test_accounts_are_isolated() {
        let store = WorkspaceStore::new();

        store.open("a@x.com").await.lock().await.threads.create();
        let other = store.open("b@x.com").await;

        assert!(other.lock().await.threads.is_empty());
        assert_eq!(store.len().await, 2);
        assert!(!store.is_empty().await);
    }
}
