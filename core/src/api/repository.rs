//! Remote task API trait
//!
//! Defines the interface for the task resource the client talks to.

use async_trait::async_trait;

use crate::task::{NewTask, Task, TaskId};
use crate::Result;

/// Interface for the remote task CRUD resource
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetch every task, in server order
    async fn list(&self) -> Result<Vec<Task>>;

    /// Create a task; the server assigns id and timestamps
    async fn create(&self, draft: NewTask) -> Result<Task>;

    /// Replace a task with the given full body
    async fn update(&self, task: Task) -> Result<Task>;

    /// Delete a task by ID
    async fn delete(&self, id: TaskId) -> Result<()>;
}
