//! HTTP task API client
//!
//! Talks to a conventional REST task resource at `{base_url}/tasks`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::repository::TaskApi;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::task::{NewTask, Task, TaskId};
use crate::Result;

/// reqwest-backed implementation of [`TaskApi`]
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    /// Create a client for the API at `base_url` with no request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig::default().with_base_url(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }

    /// Send a request, turning transport failures and non-2xx statuses into errors
    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let resp = request.send().await.map_err(|e| {
            warn!("{} failed to reach the task API: {}", action, e);
            Error::Network(format!("Failed to {}: {}", action, e))
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("{} rejected with HTTP {}: {}", action, status, body);
            return Err(Error::server(status, body));
        }

        debug!("{} succeeded with HTTP {}", action, status);
        Ok(resp)
    }

    async fn read_body(resp: Response, action: &str) -> Result<Vec<u8>> {
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Failed to read {} response: {}", action, e)))?;
        Ok(bytes.to_vec())
    }

    fn decode<T: DeserializeOwned>(body: &[u8], action: &str) -> Result<T> {
        serde_json::from_slice(body).map_err(|e| {
            Error::InvalidResponse(format!("Failed to parse {} response: {}", action, e))
        })
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>> {
        let resp = self
            .send(self.client.get(self.tasks_url()), "fetch tasks")
            .await?;
        let body = Self::read_body(resp, "fetch tasks").await?;
        Self::decode(&body, "fetch tasks")
    }

    async fn create(&self, draft: NewTask) -> Result<Task> {
        let resp = self
            .send(self.client.post(self.tasks_url()).json(&draft), "create task")
            .await?;
        let body = Self::read_body(resp, "create task").await?;
        Self::decode(&body, "create task")
    }

    async fn update(&self, task: Task) -> Result<Task> {
        let resp = self
            .send(
                self.client.put(self.task_url(task.id)).json(&task),
                "update task",
            )
            .await?;
        let body = Self::read_body(resp, "update task").await?;

        // Some servers answer a replacement with no body
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(task);
        }
        Self::decode(&body, "update task")
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        self.send(self.client.delete(self.task_url(id)), "delete task")
            .await?;
        Ok(())
    }
}
