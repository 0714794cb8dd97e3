//! Chat thread and message types

use serde::{Deserialize, Serialize};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    You,
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::You => write!(f, "You"),
            Sender::Bot => write!(f, "Bot"),
        }
    }
}

/// One message in a thread
///
/// Serializes as a `[sender, text]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Sender, String)", into = "(Sender, String)")]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    pub fn you(text: impl Into<String>) -> Self {
        Self::new(Sender::You, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }
}

impl From<(Sender, String)> for ChatMessage {
    fn from((sender, text): (Sender, String)) -> Self {
        Self { sender, text }
    }
}

impl From<ChatMessage> for (Sender, String) {
    fn from(msg: ChatMessage) -> Self {
        (msg.sender, msg.text)
    }
}

/// A named, append-only conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatThread {
    name: String,
    messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append a message, returning the new message count
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> usize {
        self.messages.push(ChatMessage::new(sender, text));
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
