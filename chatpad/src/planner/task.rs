//! Planner task types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable task identifier, independent of list position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(uuid::Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Random tail only; the v7 head is a millisecond timestamp
        let hex = self.0.simple().to_string();
        write!(f, "{}", &hex[hex.len() - 12..])
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerTask {
    pub id: TaskId,
    pub text: String,
    pub due: Option<NaiveDate>,
    pub done: bool,
}

impl PlannerTask {
    pub fn new(text: impl Into<String>, due: Option<NaiveDate>) -> Self {
        Self {
            id: TaskId::new(),
            text: text.into(),
            due,
            done: false,
        }
    }

    /// Open task whose due date is before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.done && self.due.is_some_and(|due| due < today)
    }
}

/// Parse a `YYYY-MM-DD` due date
pub fn parse_due(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
}
