//! Backend collaborator interface.

use async_trait::async_trait;

use crate::entities::{ListQuery, Task, TaskDraft, TaskPatch};
use crate::errors::TasksResult;

/// Remote task store that owns the authoritative task records
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Backend identifier used in logs
    fn backend_name(&self) -> &'static str;

    /// List tasks matching `query`
    async fn list_tasks(&self, query: &ListQuery) -> TasksResult<Vec<Task>>;

    /// Fetch one task; a missing id is `TaskNotFound`
    async fn get_task(&self, task_id: &str) -> TasksResult<Task>;

    /// Create a task, returning the stored record with its assigned ids
    async fn create_task(&self, draft: &TaskDraft) -> TasksResult<Task>;

    /// Apply a partial update, returning the stored record
    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> TasksResult<Task>;

    /// Delete a task
    async fn delete_task(&self, task_id: &str) -> TasksResult<()>;
}
