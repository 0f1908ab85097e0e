//! Business logic services
//!
//! - [`tasks`] - Resource operations on tasks, statuses and projects

pub mod tasks;

pub use tasks::{
    CompletionRule, ErrorPolicy, NewTask, Operation, TaskError, TaskService, collection_members,
    mentions_completion,
};
