//! Command implementations

mod catalog;
mod task;

pub use catalog::{projects, statuses};
pub use task::{create, delete, list, move_task, show, update};
