//! Subtask entity.

use serde::{Deserialize, Serialize};

/// Subtask structure (nested within tasks, no lifecycle of its own)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    /// Identifier, unique within the parent task
    pub id: String,

    /// Brief, descriptive title
    pub title: String,

    /// Declared effort in hours
    #[serde(default, rename = "estimatedHours")]
    pub estimated_hours: f64,

    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    /// Create a new, open subtask
    pub fn new(id: impl Into<String>, title: impl Into<String>, estimated_hours: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            estimated_hours,
            completed: false,
        }
    }

    /// Mark the subtask done or open
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Flip the completion flag, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}
