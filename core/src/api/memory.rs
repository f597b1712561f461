//! In-memory task API
//!
//! Behaves like the remote task resource without a network: assigns
//! sequential ids and timestamps, keeps insertion order, and can be told to
//! fail upcoming requests or to answer slowly.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::RwLock;

use super::repository::TaskApi;
use crate::error::Error;
use crate::task::{NewTask, Task, TaskId};
use crate::Result;

/// A request received by [`MemoryTaskApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    List,
    Create(NewTask),
    Update(Task),
    Delete(TaskId),
}

struct Inner {
    tasks: Vec<Task>,
    next_id: TaskId,
}

/// In-memory stand-in for the remote task API
pub struct MemoryTaskApi {
    inner: RwLock<Inner>,
    failures: Mutex<VecDeque<Error>>,
    requests: Mutex<Vec<ApiRequest>>,
    latency: Option<Duration>,
}

impl Default for MemoryTaskApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTaskApi {
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Start with existing tasks; new ids continue after the highest one
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Inner { tasks, next_id }),
            failures: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            latency: None,
        }
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make the next request fail with `error` instead of being served
    pub fn fail_next(&self, error: Error) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(error);
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Server-side view of the tasks
    pub async fn stored(&self) -> Vec<Task> {
        self.inner.read().await.tasks.clone()
    }

    async fn receive(&self, request: ApiRequest) -> Result<()> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let failure = self
            .failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn not_found(id: TaskId) -> Error {
        Error::server(StatusCode::NOT_FOUND, format!("Task {} not found", id))
    }
}

#[async_trait]
impl TaskApi for MemoryTaskApi {
    async fn list(&self) -> Result<Vec<Task>> {
        self.receive(ApiRequest::List).await?;
        Ok(self.inner.read().await.tasks.clone())
    }

    async fn create(&self, draft: NewTask) -> Result<Task> {
        self.receive(ApiRequest::Create(draft.clone())).await?;

        if draft.title.trim().is_empty() {
            return Err(Error::server(StatusCode::BAD_REQUEST, "Title is required"));
        }

        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let task = Task {
            id: inner.next_id,
            title: draft.title,
            color: draft.color,
            completed: draft.completed,
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, mut task: Task) -> Result<Task> {
        self.receive(ApiRequest::Update(task.clone())).await?;

        let mut inner = self.inner.write().await;
        let Some(stored) = inner.tasks.iter_mut().find(|t| t.id == task.id) else {
            return Err(Self::not_found(task.id));
        };
        task.created_at = stored.created_at;
        task.updated_at = Some(Utc::now());
        *stored = task.clone();
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        self.receive(ApiRequest::Delete(id)).await?;

        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        if inner.tasks.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
