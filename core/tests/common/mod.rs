//! Shared helpers: an axum task server backed by `MemoryTaskApi`
#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

use tasklist_core::api::{MemoryTaskApi, TaskApi};
use tasklist_core::task::{NewTask, Task, TaskId};
use tasklist_core::Error;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "tasklist_core=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn task(id: TaskId, title: &str, color: &str, completed: bool) -> Task {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "color": color,
        "completed": completed,
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    }))
    .unwrap()
}

#[derive(Clone)]
pub struct FakeServer {
    pub api: Arc<MemoryTaskApi>,
    bodies: Arc<Mutex<Vec<Value>>>,
    quiet_updates: bool,
}

impl FakeServer {
    pub fn new(api: MemoryTaskApi) -> Self {
        Self {
            api: Arc::new(api),
            bodies: Arc::new(Mutex::new(Vec::new())),
            quiet_updates: false,
        }
    }

    /// Answer PUT with 204 and no body
    pub fn with_quiet_updates(mut self) -> Self {
        self.quiet_updates = true;
        self
    }

    /// Raw JSON bodies received by POST and PUT, in order
    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    fn record(&self, body: &Value) {
        self.bodies.lock().unwrap().push(body.clone());
    }

    /// Serve on an ephemeral local port and return the base URL
    pub async fn spawn(&self) -> String {
        spawn_router(
            Router::new()
                .route("/tasks", get(list_tasks).post(create_task))
                .route("/tasks/{id}", put(update_task).delete(delete_task))
                .with_state(self.clone()),
        )
        .await
    }
}

pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn error_response(error: Error) -> Response {
    match error {
        Error::Server { status, message } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message,
        )
            .into_response(),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response(),
    }
}

async fn list_tasks(State(server): State<FakeServer>) -> Response {
    match server.api.list().await {
        Ok(tasks) => Json(tasks).into_response(),
        Err(e) => error_response(e),
    }
}

async fn create_task(State(server): State<FakeServer>, Json(body): Json<Value>) -> Response {
    server.record(&body);
    let draft: NewTask = match serde_json::from_value(body) {
        Ok(draft) => draft,
        Err(e) => return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    };
    match server.api.create(draft).await {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn update_task(
    State(server): State<FakeServer>,
    Path(id): Path<TaskId>,
    Json(body): Json<Value>,
) -> Response {
    server.record(&body);
    let mut task: Task = match serde_json::from_value(body) {
        Ok(task) => task,
        Err(e) => return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    };
    task.id = id;
    match server.api.update(task).await {
        Ok(_) if server.quiet_updates => StatusCode::NO_CONTENT.into_response(),
        Ok(task) => Json(task).into_response(),
        Err(e) => error_response(e),
    }
}

async fn delete_task(State(server): State<FakeServer>, Path(id): Path<TaskId>) -> Response {
    match server.api.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
