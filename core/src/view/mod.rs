//! View layer
//!
//! UI-only state for the listing and creation views, and the controller
//! that drives the task store from user events.

mod controller;
mod state;

pub use controller::ViewController;
pub use state::*;
