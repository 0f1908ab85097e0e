//! Task statuses
//!
//! Statuses are read-only from the client's point of view. The server ships
//! four well-known ones which the client uses as defaults.

use serde::{Deserialize, Serialize};

use super::id::EntityId;
use super::relation::{Named, text_or_empty};

/// Well-known status ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusId {
    /// 1 - not yet planned
    Idea,
    /// 2 - planned
    Todo,
    /// 3 - being worked on
    InProgress,
    /// 4 - finished
    Done,
}

impl StatusId {
    /// Numeric id on the server
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Idea => 1,
            Self::Todo => 2,
            Self::InProgress => 3,
            Self::Done => 4,
        }
    }
}

impl From<StatusId> for EntityId {
    fn from(status: StatusId) -> Self {
        Self::Int(status.id())
    }
}

/// The statuses shown by default: Todo and In Progress
pub const ACTIVE_STATUSES: [StatusId; 2] = [StatusId::Todo, StatusId::InProgress];

/// A task status
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status {
    /// Status id (missing on some embedded representations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Display name
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
}

impl Named for Status {
    fn name(&self) -> &str {
        &self.name
    }
}
