//! Payloads of the backend request contract.
//!
//! Validation mirrors the backend's own checks so that bad input is rejected
//! before a request goes out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FilterCategory, SortKey, Subtask, Task, ViewState};
use crate::errors::{TasksError, TasksResult};

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const LIST_LIMIT_MAX: u32 = 1000;

/// Subtask as submitted; the backend assigns the identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtaskDraft {
    pub title: String,
    #[serde(rename = "estimatedHours")]
    pub estimated_hours: f64,
    #[serde(default)]
    pub completed: bool,
}

impl SubtaskDraft {
    pub fn new(title: impl Into<String>, estimated_hours: f64) -> Self {
        Self {
            title: title.into(),
            estimated_hours,
            completed: false,
        }
    }

    pub fn validate(&self) -> TasksResult<()> {
        validate_title(&self.title, "subtask title")?;
        validate_hours(self.estimated_hours, "subtask estimatedHours")
    }
}

impl From<&Subtask> for SubtaskDraft {
    fn from(subtask: &Subtask) -> Self {
        Self {
            title: subtask.title.clone(),
            estimated_hours: subtask.estimated_hours,
            completed: subtask.completed,
        }
    }
}

/// A new task, without identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "startDateTime")]
    pub start_date_time: DateTime<Utc>,
    #[serde(rename = "endDateTime")]
    pub end_date_time: DateTime<Utc>,
    #[serde(rename = "estimatedHours")]
    pub estimated_hours: f64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub subtasks: Vec<SubtaskDraft>,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        start_date_time: DateTime<Utc>,
        end_date_time: DateTime<Utc>,
        estimated_hours: f64,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start_date_time,
            end_date_time,
            estimated_hours,
            completed: false,
            subtasks: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_subtask(mut self, subtask: SubtaskDraft) -> Self {
        self.subtasks.push(subtask);
        self
    }

    pub fn validate(&self) -> TasksResult<()> {
        validate_title(&self.title, "title")?;
        validate_description(&self.description)?;
        validate_hours(self.estimated_hours, "estimatedHours")?;
        validate_window(self.start_date_time, self.end_date_time)?;
        self.subtasks.iter().try_for_each(SubtaskDraft::validate)
    }
}

/// Partial update keyed by task identifier; absent fields stay unchanged
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        rename = "startDateTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "endDateTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "estimatedHours",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// Replaces the whole subtask list when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<SubtaskDraft>>,
}

impl TaskPatch {
    /// A patch carrying every editable field of `task`
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            start_date_time: Some(task.start_date_time),
            end_date_time: Some(task.end_date_time),
            estimated_hours: Some(task.estimated_hours),
            completed: Some(task.completed),
            subtasks: Some(task.subtasks.iter().map(SubtaskDraft::from).collect()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validate the patch as it would apply on top of `current`
    pub fn validate_against(&self, current: &Task) -> TasksResult<()> {
        if let Some(title) = &self.title {
            validate_title(title, "title")?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(hours) = self.estimated_hours {
            validate_hours(hours, "estimatedHours")?;
        }
        if self.start_date_time.is_some() || self.end_date_time.is_some() {
            validate_window(
                self.start_date_time.unwrap_or(current.start_date_time),
                self.end_date_time.unwrap_or(current.end_date_time),
            )?;
        }
        if let Some(subtasks) = &self.subtasks {
            subtasks.iter().try_for_each(SubtaskDraft::validate)?;
        }
        Ok(())
    }
}

/// Query for the backend's list operation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Tri-state completion filter; `None` means either
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_by: Option<FilterCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListQuery {
    /// Translate a view selection into its server-side equivalent
    pub fn for_view(state: &ViewState, limit: u32) -> Self {
        let completed = match state.category {
            FilterCategory::Completed => Some(true),
            FilterCategory::InProgress => Some(false),
            _ => None,
        };
        let filter_by = match state.category {
            FilterCategory::All => None,
            other => Some(other),
        };
        let search = Some(state.trimmed_query())
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        Self {
            completed,
            sort_by: Some(state.sort),
            filter_by,
            search,
            skip: None,
            limit: Some(limit),
        }
    }

    pub fn validate(&self) -> TasksResult<()> {
        if let Some(limit) = self.limit {
            if limit == 0 || limit > LIST_LIMIT_MAX {
                return Err(TasksError::InvalidArgument {
                    reason: format!("limit must be between 1 and {LIST_LIMIT_MAX}, got {limit}"),
                });
            }
        }
        Ok(())
    }
}

fn validate_title(title: &str, field: &str) -> TasksResult<()> {
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX_CHARS {
        return Err(TasksError::invalid_task(format!(
            "{field} must be 1-{TITLE_MAX_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> TasksResult<()> {
    let len = description.chars().count();
    if len > DESCRIPTION_MAX_CHARS {
        return Err(TasksError::invalid_task(format!(
            "description must be at most {DESCRIPTION_MAX_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

fn validate_hours(hours: f64, field: &str) -> TasksResult<()> {
    if !(hours.is_finite() && hours > 0.0) {
        return Err(TasksError::invalid_task(format!(
            "{field} must be greater than 0, got {hours}"
        )));
    }
    Ok(())
}

fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> TasksResult<()> {
    if end <= start {
        return Err(TasksError::invalid_task(
            "endDateTime must be after startDateTime",
        ));
    }
    Ok(())
}
