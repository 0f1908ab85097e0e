//! Resource identifiers
//!
//! The API issues integer ids, but commands accept whatever the user typed,
//! so an identifier is either a number or opaque text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a task, status or project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Numeric id as issued by the API
    Int(i64),
    /// Anything that is not a plain integer
    Text(String),
}

impl EntityId {
    /// The textual form, if this id is not numeric
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for EntityId {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed.parse::<i64>().map_or_else(|_| Self::Text(trimmed.to_string()), Self::Int)
    }
}

impl From<String> for EntityId {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl FromStr for EntityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("Identifier must not be empty".to_string());
        }
        Ok(Self::from(s))
    }
}
