//! Task model
//!
//! A task as returned by the API. Collection endpoints leave `status` and
//! `project` as IRIs while the detail endpoint embeds them, so both are
//! [`Relation`]s. Timestamps are kept as the strings the server sent.

use serde::{Deserialize, Serialize};

use super::id::EntityId;
use super::project::Project;
use super::relation::{Relation, text_or_empty};
use super::status::Status;

/// Priority given to new tasks when none is supplied
pub const DEFAULT_PRIORITY: u32 = 2;

/// A task - a unit of work tracked by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier
    pub id: EntityId,

    /// What needs to be done
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,

    /// Optional longer text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Priority, 1 and up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,

    /// Workflow status
    #[serde(default, skip_serializing_if = "Relation::is_absent")]
    pub status: Relation<Status>,

    /// Owning project
    #[serde(default, skip_serializing_if = "Relation::is_absent")]
    pub project: Relation<Project>,

    /// Due date (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// When the task moved into a completed status (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    /// Creation time, set by the server (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
