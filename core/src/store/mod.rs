//! Task store
//!
//! The only component that talks to the remote task API and the only path
//! that mutates the local task collection. Every operation follows the same
//! two phases: send the request and wait for it, then apply a [`TaskEvent`]
//! to the collection. Nothing local changes when the request fails.

mod in_flight;

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::{HttpTaskApi, TaskApi};
use crate::config::{ClientConfig, EditPolicy};
use crate::error::Error;
use crate::task::{is_blank_title, Color, NewTask, Task, TaskCollection, TaskEvent, TaskId};
use crate::Result;

use in_flight::{InFlight, InFlightGuard};

/// Outcome of the most recent full fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "message")]
pub enum LoadStatus {
    /// No fetch has completed yet
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Point-in-time copy of the store for rendering
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub tasks: Vec<Task>,
    pub total: usize,
    pub completed_count: usize,
    pub status: LoadStatus,
    pub pending: Vec<TaskId>,
}

struct StoreState {
    collection: TaskCollection,
    status: LoadStatus,
}

/// Cloneable handle over the shared task state
#[derive(Clone)]
pub struct TaskStore {
    api: Arc<dyn TaskApi>,
    state: Arc<RwLock<StoreState>>,
    in_flight: InFlight,
    edit_policy: EditPolicy,
    guard_in_flight: bool,
}

impl TaskStore {
    /// Create a store over `api` with default settings
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self::with_config(api, &ClientConfig::default())
    }

    pub fn with_config(api: Arc<dyn TaskApi>, config: &ClientConfig) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(StoreState {
                collection: TaskCollection::new(),
                status: LoadStatus::Loading,
            })),
            in_flight: InFlight::default(),
            edit_policy: config.edit_policy,
            guard_in_flight: config.guard_in_flight,
        }
    }

    /// Create a store talking HTTP to `config.base_url`
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let api = HttpTaskApi::from_config(config)?;
        info!("Task store connected to {}", api.base_url());
        Ok(Self::with_config(Arc::new(api), config))
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        StoreSnapshot {
            tasks: state.collection.tasks().to_vec(),
            total: state.collection.len(),
            completed_count: state.collection.completed_count(),
            status: state.status.clone(),
            pending: self.in_flight.pending_ids(),
        }
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.state.read().await.collection.tasks().to_vec()
    }

    pub async fn get(&self, id: TaskId) -> Option<Task> {
        self.state.read().await.collection.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.collection.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.collection.is_empty()
    }

    pub async fn completed_count(&self) -> usize {
        self.state.read().await.collection.completed_count()
    }

    pub async fn load_status(&self) -> LoadStatus {
        self.state.read().await.status.clone()
    }

    /// Whether an operation on `id` is waiting for the server
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.in_flight.is_pending(id)
    }

    /// Replace the local collection with the server's.
    ///
    /// On failure the collection is kept and the status records the error.
    pub async fn load_all(&self) -> Result<()> {
        debug!("Fetching all tasks");
        let result = self.api.list().await;

        let mut state = self.state.write().await;
        match result {
            Ok(tasks) => {
                state.collection.apply(TaskEvent::Loaded(tasks));
                state.status = LoadStatus::Ready;
                info!(
                    total = state.collection.len(),
                    completed = state.collection.completed_count(),
                    "Loaded tasks"
                );
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load tasks: {}", e);
                state.status = LoadStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Create a task and append the server's copy to the collection
    pub async fn create(&self, title: &str, color: impl Into<Color>) -> Result<Task> {
        check_title(title)?;
        let draft = NewTask::new(title).with_color(color);

        let task = self.api.create(draft).await.map_err(|e| {
            warn!("Failed to create task: {}", e);
            e
        })?;

        self.apply(TaskEvent::Created(task.clone())).await;
        info!(id = task.id, "Created task");
        Ok(task)
    }

    /// Flip a task's completed flag
    pub async fn toggle_completed(&self, id: TaskId) -> Result<Task> {
        let _guard = self.track(id)?;
        let current = self.require(id).await?;

        let replacement = current.toggled();
        let confirmed = self.send_update(replacement).await.map_err(|e| {
            warn!(id, "Failed to toggle task completion: {}", e);
            e
        })?;

        debug!(id, completed = confirmed.completed, "Toggled task");
        Ok(confirmed)
    }

    /// Change a task's title and color.
    ///
    /// The completed flag sent with the replacement depends on the store's
    /// [`EditPolicy`]. The title is sent as typed.
    pub async fn edit(&self, id: TaskId, title: &str, color: impl Into<Color>) -> Result<Task> {
        check_title(title)?;
        let _guard = self.track(id)?;
        let current = self.require(id).await?;

        let completed = match self.edit_policy {
            EditPolicy::PreserveCompletion => current.completed,
            EditPolicy::ResetCompletion => false,
        };
        let replacement = current.edited(title, color.into(), completed);

        let confirmed = self.send_update(replacement).await.map_err(|e| {
            warn!(id, "Failed to save task edit: {}", e);
            e
        })?;

        info!(id, "Edited task");
        Ok(confirmed)
    }

    /// Delete a task
    pub async fn remove(&self, id: TaskId) -> Result<()> {
        let _guard = self.track(id)?;
        self.require(id).await?;

        self.api.delete(id).await.map_err(|e| {
            warn!(id, "Failed to delete task: {}", e);
            e
        })?;

        self.apply(TaskEvent::Removed(id)).await;
        info!(id, "Deleted task");
        Ok(())
    }

    /// Send a full replacement and apply the server's copy of it
    async fn send_update(&self, replacement: Task) -> Result<Task> {
        let id = replacement.id;
        let mut confirmed = self.api.update(replacement).await?;
        confirmed.id = id;
        self.apply(TaskEvent::Updated(confirmed.clone())).await;
        Ok(confirmed)
    }

    async fn require(&self, id: TaskId) -> Result<Task> {
        self.get(id).await.ok_or(Error::TaskNotFound(id))
    }

    fn track(&self, id: TaskId) -> Result<Option<InFlightGuard>> {
        if !self.guard_in_flight {
            return Ok(None);
        }
        self.in_flight.acquire(id).map(Some).map_err(|e| {
            debug!(id, "Rejected overlapping operation");
            e
        })
    }

    async fn apply(&self, event: TaskEvent) {
        let mut state = self.state.write().await;
        if !state.collection.apply(event) {
            // The task went away while the request was in flight
            debug!("Confirmed change no longer matches a local task");
        }
    }
}

fn check_title(title: &str) -> Result<()> {
    if is_blank_title(title) {
        return Err(Error::InvalidInput("Title cannot be empty".to_string()));
    }
    Ok(())
}
