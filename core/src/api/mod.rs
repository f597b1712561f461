//! Remote task API
//!
//! This module contains the `TaskApi` trait and its implementations: the
//! HTTP client used against a real server, and an in-memory stand-in.

mod http;
mod memory;
mod repository;

pub use http::HttpTaskApi;
pub use memory::{ApiRequest, MemoryTaskApi};
pub use repository::TaskApi;
