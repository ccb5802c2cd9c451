//! Read-only task snapshots from disk.

use std::path::Path;

use serde_json::Value;
use tokio::fs;

use crate::entities::Task;
use crate::errors::{TasksError, TasksResult};

/// Load tasks from a JSON file.
///
/// Accepts either a bare array of tasks or an object with a `tasks` array,
/// which is what a saved list response looks like.
pub async fn read_snapshot(path: impl AsRef<Path>) -> TasksResult<Vec<Task>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| TasksError::FileReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    parse_snapshot(&content)
}

/// Parse snapshot text in either accepted layout
pub fn parse_snapshot(content: &str) -> TasksResult<Vec<Task>> {
    let data: Value = serde_json::from_str(content)?;
    let tasks = match data {
        array @ Value::Array(_) => array,
        Value::Object(mut map) => map.remove("tasks").ok_or_else(|| TasksError::JsonParseError {
            reason: "expected an array of tasks or an object with a 'tasks' field".to_string(),
        })?,
        _ => {
            return Err(TasksError::JsonParseError {
                reason: "expected an array of tasks".to_string(),
            })
        }
    };
    Ok(serde_json::from_value(tasks)?)
}
