//! Tasks domain facade.

use std::sync::Arc;

use tracing::info;

use crate::client::TaskApi;
use crate::entities::{ListQuery, Task, TaskDraft, TaskPatch, ViewState, LIST_LIMIT_MAX};
use crate::errors::{TasksError, TasksResult};

/// Tasks domain facade: validates requests before they reach the backend
pub struct TasksDomain {
    api: Arc<dyn TaskApi>,
    page_limit: u32,
}

impl TasksDomain {
    /// Create a new tasks domain
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            page_limit: LIST_LIMIT_MAX,
        }
    }

    /// Page size requested by [`load`](Self::load) and [`load_all`](Self::load_all)
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Fetch tasks with the view selection translated to a server-side query
    pub async fn load(&self, state: &ViewState) -> TasksResult<Vec<Task>> {
        let query = ListQuery::for_view(state, self.page_limit);
        query.validate()?;
        let tasks = self.api.list_tasks(&query).await?;
        info!(
            backend = self.api.backend_name(),
            count = tasks.len(),
            "loaded tasks for view"
        );
        Ok(tasks)
    }

    /// Fetch an unfiltered snapshot
    pub async fn load_all(&self) -> TasksResult<Vec<Task>> {
        let query = ListQuery {
            limit: Some(self.page_limit),
            ..ListQuery::default()
        };
        query.validate()?;
        let tasks = self.api.list_tasks(&query).await?;
        info!(
            backend = self.api.backend_name(),
            count = tasks.len(),
            "loaded task snapshot"
        );
        Ok(tasks)
    }

    /// Get a specific task by ID
    pub async fn get(&self, task_id: &str) -> TasksResult<Task> {
        self.api.get_task(task_id).await
    }

    /// Validate and create a task
    pub async fn create(&self, draft: &TaskDraft) -> TasksResult<Task> {
        draft.validate()?;
        let task = self.api.create_task(draft).await?;
        info!(task_id = %task.id, "created task");
        Ok(task)
    }

    /// Validate a patch against the stored task and apply it
    pub async fn update(&self, task_id: &str, patch: &TaskPatch) -> TasksResult<Task> {
        if patch.is_empty() {
            return Err(TasksError::InvalidArgument {
                reason: "update carries no changes".to_string(),
            });
        }
        let current = self.api.get_task(task_id).await?;
        patch.validate_against(&current)?;
        self.api.update_task(task_id, patch).await
    }

    /// Send every editable field of a locally edited task
    pub async fn save(&self, task: &Task) -> TasksResult<Task> {
        let patch = TaskPatch::from_task(task);
        patch.validate_against(task)?;
        self.api.update_task(&task.id, &patch).await
    }

    /// Flip the task's own completion flag
    pub async fn toggle_complete(&self, task_id: &str) -> TasksResult<Task> {
        let current = self.api.get_task(task_id).await?;
        let patch = TaskPatch {
            completed: Some(!current.completed),
            ..TaskPatch::default()
        };
        let task = self.api.update_task(task_id, &patch).await?;
        info!(task_id, completed = task.completed, "toggled task");
        Ok(task)
    }

    /// Flip one subtask's completion and send the whole subtask list
    pub async fn toggle_subtask(&self, task_id: &str, subtask_id: &str) -> TasksResult<Task> {
        let mut current = self.api.get_task(task_id).await?;
        let completed = current.toggle_subtask(subtask_id)?;
        let patch = TaskPatch {
            subtasks: Some(current.subtasks.iter().map(Into::into).collect()),
            ..TaskPatch::default()
        };
        let task = self.api.update_task(task_id, &patch).await?;
        info!(task_id, subtask_id, completed, "toggled subtask");
        Ok(task)
    }

    /// Delete a task
    pub async fn remove(&self, task_id: &str) -> TasksResult<()> {
        self.api.delete_task(task_id).await?;
        info!(task_id, "removed task");
        Ok(())
    }
}
