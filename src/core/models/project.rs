//! Projects

use serde::{Deserialize, Serialize};

use super::id::EntityId;
use super::relation::{Named, text_or_empty};

/// A project tasks are grouped under
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project id (missing on some embedded representations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Display name
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    /// Abbreviation shown in brackets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Color hint (free-form, usually a hex code)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Named for Project {
    fn name(&self) -> &str {
        &self.name
    }
}
