//! Error types for the intellitasker crate.
//!
//! The derivation engine is total and never fails; these errors come from
//! parsing user input, configuration, and the backend collaborator.

use thiserror::Error;

/// Errors surfaced by parsing, configuration, and backend calls
#[derive(Error, Debug, Clone)]
pub enum TasksError {
    // Input errors
    #[error("Invalid filter category: '{value}'")]
    InvalidFilter { value: String },

    #[error("Invalid sort key: '{value}'")]
    InvalidSort { value: String },

    #[error("Invalid task: {reason}")]
    InvalidTask { reason: String },

    #[error("Invalid timestamp: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("Invalid collation locale: '{locale}'")]
    InvalidLocale { locale: String },

    // Lookup errors
    #[error("Task '{task_id}' not found")]
    TaskNotFound { task_id: String },

    #[error("Subtask '{subtask_id}' not found in task '{task_id}'")]
    SubtaskNotFound { task_id: String, subtask_id: String },

    // Backend errors
    #[error("Backend returned {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("HTTP error: {reason}")]
    Http { reason: String },

    // File errors
    #[error("Storage error: {reason}")]
    StorageError { reason: String },

    #[error("Failed to read file '{path}': {reason}")]
    FileReadError { path: String, reason: String },

    #[error("Failed to write file '{path}': {reason}")]
    FileWriteError { path: String, reason: String },

    #[error("Failed to parse JSON: {reason}")]
    JsonParseError { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidConfigValue { key: String, reason: String },

    // General errors
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl TasksError {
    /// Shorthand for a task validation failure
    pub fn invalid_task(reason: impl Into<String>) -> Self {
        Self::InvalidTask {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for TasksError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TasksError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParseError {
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for TasksError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for intellitasker operations
pub type TasksResult<T> = Result<T, TasksError>;
