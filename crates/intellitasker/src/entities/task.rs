//! Task entity and per-task progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Subtask;
use crate::engine;
use crate::errors::{TasksError, TasksResult};
use crate::moment;

/// Core task structure, as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Globally unique identifier (assigned by the backend)
    pub id: String,

    /// Brief, descriptive title
    pub title: String,

    /// Free-form description, may be empty
    #[serde(default)]
    pub description: String,

    /// Start of the planned window
    #[serde(
        rename = "startDateTime",
        with = "moment::lenient",
        default = "moment::earliest"
    )]
    pub start_date_time: DateTime<Utc>,

    /// End of the planned window. Not validated against the start here.
    #[serde(
        rename = "endDateTime",
        with = "moment::lenient",
        default = "moment::earliest"
    )]
    pub end_date_time: DateTime<Utc>,

    /// The task's own estimate, independent of its subtasks
    #[serde(default, rename = "estimatedHours")]
    pub estimated_hours: f64,

    /// Own completion flag. Ignored once the task has subtasks.
    #[serde(default)]
    pub completed: bool,

    /// Subtasks in insertion order
    #[serde(default)]
    pub subtasks: Vec<Subtask>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Task {
    /// Create a task with an empty description and no subtasks
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date_time: DateTime<Utc>,
        end_date_time: DateTime<Utc>,
        estimated_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            start_date_time,
            end_date_time,
            estimated_hours,
            completed: false,
            subtasks: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn with_subtasks(mut self, subtasks: Vec<Subtask>) -> Self {
        self.subtasks = subtasks;
        self
    }

    /// Effective completion (see [`engine::is_complete`])
    pub fn is_complete(&self) -> bool {
        engine::is_complete(self)
    }

    /// Whether the window ended before `now`, regardless of completion
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        engine::is_overdue(self, now)
    }

    /// Subtask counters for progress display and the `progress` sort key
    pub fn progress(&self) -> SubtaskProgress {
        SubtaskProgress::of(&self.subtasks)
    }

    /// Get subtask by ID
    pub fn get_subtask(&self, subtask_id: &str) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == subtask_id)
    }

    /// Get mutable subtask by ID
    pub fn get_subtask_mut(&mut self, subtask_id: &str) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == subtask_id)
    }

    /// Add a subtask at the end
    pub fn add_subtask(&mut self, subtask: Subtask) {
        self.subtasks.push(subtask);
    }

    /// Flip the task's own completion flag, returning the new value
    pub fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Flip one subtask's completion flag, returning the new value
    pub fn toggle_subtask(&mut self, subtask_id: &str) -> TasksResult<bool> {
        let task_id = self.id.clone();
        self.get_subtask_mut(subtask_id)
            .map(Subtask::toggle)
            .ok_or_else(|| TasksError::SubtaskNotFound {
                task_id,
                subtask_id: subtask_id.to_string(),
            })
    }
}

/// Completed/total subtask counts and the summed subtask estimate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubtaskProgress {
    pub completed: usize,
    pub total: usize,
    pub hours: f64,
}

impl SubtaskProgress {
    pub fn of(subtasks: &[Subtask]) -> Self {
        Self {
            completed: subtasks.iter().filter(|s| s.completed).count(),
            total: subtasks.len(),
            hours: subtasks.iter().map(|s| s.estimated_hours).sum(),
        }
    }

    /// Completed share in `0.0..=1.0`; zero without subtasks
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }
}
