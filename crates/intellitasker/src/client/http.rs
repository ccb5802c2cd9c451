//! HTTP implementation of the task backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::traits::TaskApi;
use crate::entities::{ApiConfig, ListQuery, Task, TaskDraft, TaskPatch};
use crate::errors::{TasksError, TasksResult};

/// Error body returned by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// Task backend reached over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    /// Client for `base_url` with the default timeout
    pub fn new(base_url: impl Into<String>) -> TasksResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(ApiConfig::default().timeout_secs))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> TasksResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> TasksResult<Self> {
        Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body, mapping error statuses
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> TasksResult<T> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| TasksError::JsonParseError {
            reason: format!("unexpected response body: {e}"),
        })
    }

    async fn send(&self, request: RequestBuilder) -> TasksResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "backend responded");

        if status.is_success() {
            Ok(body)
        } else {
            Err(TasksError::Api {
                status: status.as_u16(),
                detail: error_detail(status, &body),
            })
        }
    }
}

/// Best-effort human message for an error response
fn error_detail(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

/// Turn a 404 on a task route into `TaskNotFound`
fn not_found_as(task_id: &str, err: TasksError) -> TasksError {
    match err {
        TasksError::Api { status: 404, .. } => TasksError::TaskNotFound {
            task_id: task_id.to_string(),
        },
        other => other,
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn list_tasks(&self, query: &ListQuery) -> TasksResult<Vec<Task>> {
        query.validate()?;
        let request = self.client.get(self.url("/tasks")).query(query);
        self.send_json(request).await
    }

    async fn get_task(&self, task_id: &str) -> TasksResult<Task> {
        let request = self.client.get(self.url(&format!("/tasks/{task_id}")));
        self.send_json(request)
            .await
            .map_err(|e| not_found_as(task_id, e))
    }

    async fn create_task(&self, draft: &TaskDraft) -> TasksResult<Task> {
        let request = self.client.post(self.url("/tasks/")).json(draft);
        self.send_json(request).await
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> TasksResult<Task> {
        let request = self
            .client
            .put(self.url(&format!("/tasks/{task_id}")))
            .json(patch);
        self.send_json(request)
            .await
            .map_err(|e| not_found_as(task_id, e))
    }

    async fn delete_task(&self, task_id: &str) -> TasksResult<()> {
        let request = self.client.delete(self.url(&format!("/tasks/{task_id}")));
        self.send(request)
            .await
            .map(|_| ())
            .map_err(|e| not_found_as(task_id, e))
    }
}
