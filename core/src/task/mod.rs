//! Task module
//!
//! This module contains the task model and the local collection reducer.

mod collection;
mod model;

pub use collection::{TaskCollection, TaskEvent};
pub use model::*;
