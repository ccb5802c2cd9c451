//! Effective completion of a task.

use crate::entities::Task;

/// Whether a task counts as done.
///
/// With at least one subtask the task is done exactly when every subtask is;
/// its own `completed` flag is ignored. Without subtasks the flag decides.
pub fn is_complete(task: &Task) -> bool {
    if task.subtasks.is_empty() {
        task.completed
    } else {
        task.subtasks.iter().all(|s| s.completed)
    }
}
