use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::error::TaskdeckError;

/// Opaque unique identifier for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a fresh random TaskId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TaskId {
    type Err = TaskdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| TaskdeckError::InvalidTaskId(s.to_string()))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a task list, as tagged on its container in the UI
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Validates a raw id; empty or whitespace-only ids are rejected
    pub fn parse(raw: &str) -> Result<Self, TaskdeckError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskdeckError::InvalidListId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ListId {
    type Err = TaskdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for ListId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Eisenhower quadrant derived from the urgent/important flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    DoFirst,
    Schedule,
    Delegate,
    Eliminate,
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoFirst => write!(f, "Do First"),
            Self::Schedule => write!(f, "Schedule"),
            Self::Delegate => write!(f, "Delegate"),
            Self::Eliminate => write!(f, "Eliminate"),
        }
    }
}

/// A routine task as supplied by the list owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub important: bool,
    #[serde(default)]
    pub long_task: bool,
    #[serde(default)]
    pub weight: u32,
    pub list_id: ListId,
    /// Relative position within `list_id`; only meaningful compared to siblings
    pub order: i64,
}

impl Task {
    /// Creates an incomplete, unprioritised task
    pub fn new(title: impl Into<String>, list_id: ListId, order: i64) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            completed: false,
            urgent: false,
            important: false,
            long_task: false,
            weight: 1,
            list_id,
            order,
        }
    }

    pub fn with_priority(mut self, urgent: bool, important: bool) -> Self {
        self.urgent = urgent;
        self.important = important;
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn as_long_task(mut self) -> Self {
        self.long_task = true;
        self
    }

    pub fn toggle_complete(&mut self) {
        self.completed = !self.completed;
    }

    pub fn quadrant(&self) -> Quadrant {
        match (self.urgent, self.important) {
            (true, true) => Quadrant::DoFirst,
            (false, true) => Quadrant::Schedule,
            (true, false) => Quadrant::Delegate,
            (false, false) => Quadrant::Eliminate,
        }
    }
}
