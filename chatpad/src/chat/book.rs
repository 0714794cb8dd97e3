//! Ordered collection of an account's chat threads

use chrono::{Local, NaiveTime};
use tracing::debug;

use super::{ChatThread, Sender};

/// Chat threads in creation order, keyed by name
#[derive(Debug, Clone, Default)]
pub struct ThreadBook {
    threads: Vec<ChatThread>,
}

impl ThreadBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty thread named from the running count and local time
    pub fn create(&mut self) -> &ChatThread {
        self.create_at(Local::now().time())
    }

    /// Create an empty thread named `Chat {n} - HH:MM:SS` for the given time
    pub fn create_at(&mut self, now: NaiveTime) -> &ChatThread {
        let name = format!("Chat {} - {}", self.threads.len() + 1, now.format("%H:%M:%S"));
        debug!(%name, "create_at: new thread");
        self.threads.push(ChatThread::new(name));
        &self.threads[self.threads.len() - 1]
    }

    pub fn get(&self, name: &str) -> Option<&ChatThread> {
        self.threads.iter().find(|t| t.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Thread at a 1-based position in the listing
    pub fn nth(&self, position: usize) -> Option<&ChatThread> {
        position.checked_sub(1).and_then(|i| self.threads.get(i))
    }

    /// Append to the named thread, returning its new message count
    pub fn append(&mut self, name: &str, sender: Sender, text: impl Into<String>) -> Option<usize> {
        let thread = self.threads.iter_mut().find(|t| t.name() == name)?;
        Some(thread.push(sender, text))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatThread> {
        self.threads.iter()
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}
