//! Core library for the task list client
//!
//! This crate contains the client-side synchronization logic, including:
//! - Task model and the local collection reducer
//! - Remote task API clients
//! - The task store mediating every remote call
//! - View controller state machines for the listing and creation views

pub mod api;
pub mod config;
pub mod error;
pub mod store;
pub mod task;
pub mod view;

pub use config::{ClientConfig, EditPolicy};
pub use error::Error;
pub use store::TaskStore;
pub use view::ViewController;

pub type Result<T> = std::result::Result<T, Error>;
