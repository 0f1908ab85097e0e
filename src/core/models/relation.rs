//! Relation references
//!
//! On the wire a relation is either an IRI string (`/api/task_statuses/2`),
//! which collection endpoints return, or the embedded object itself, which
//! detail endpoints return. [`Relation`] keeps the two apart from a missing
//! field so display code never guesses at the shape.

use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix shared by every resource IRI
pub const IRI_PREFIX: &str = "/api";

/// Resource collections a relation can point into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `/api/tasks`
    Task,
    /// `/api/task_statuses`
    TaskStatus,
    /// `/api/projects`
    Project,
}

impl ResourceKind {
    /// Plural collection segment used in paths and IRIs
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Task => "tasks",
            Self::TaskStatus => "task_statuses",
            Self::Project => "projects",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// Format the IRI for a resource: `/api/{kind_plural}/{id}`
///
/// Encoding is total; the result always has the unresolved (string) shape.
#[must_use]
pub fn to_iri(kind: ResourceKind, id: impl fmt::Display) -> String {
    format!("{IRI_PREFIX}/{}/{id}", kind.plural())
}

/// Something that carries a human-readable name
pub trait Named {
    /// The display name (may be empty)
    fn name(&self) -> &str;
}

/// A relation field as it arrives from the API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Relation<T> {
    /// Field missing or null
    #[default]
    Absent,
    /// Bare IRI reference, not expanded by the server
    Unresolved {
        /// The IRI string, e.g. `/api/task_statuses/2`
        iri: String,
    },
    /// Embedded object
    Resolved(T),
}

impl<T: DeserializeOwned + Default> Relation<T> {
    /// Classify a raw field value
    ///
    /// `None` and `null` are absent and a string is an unresolved IRI. Any
    /// other value is resolved; if it does not look like `T` it becomes a
    /// nameless `T::default()`.
    #[must_use]
    pub fn resolve(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::String(iri)) => Self::Unresolved { iri: iri.clone() },
            Some(other) => Self::Resolved(T::deserialize(other).unwrap_or_default()),
        }
    }
}

impl<T> Relation<T> {
    /// Whether the field was missing
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The IRI, if the relation is unresolved
    #[must_use]
    pub fn iri(&self) -> Option<&str> {
        match self {
            Self::Unresolved { iri } => Some(iri),
            _ => None,
        }
    }

    /// The embedded object, if the relation is resolved
    #[must_use]
    pub const fn resolved(&self) -> Option<&T> {
        match self {
            Self::Resolved(object) => Some(object),
            _ => None,
        }
    }
}

impl<T: Named> Relation<T> {
    /// Label for display
    ///
    /// A resolved object with a non-empty name shows that name. An IRI shows
    /// `unresolved`. Anything else, including a nameless object, shows
    /// `absent`.
    #[must_use]
    pub fn label<'a>(&'a self, unresolved: &'a str, absent: &'a str) -> &'a str {
        match self {
            Self::Resolved(object) if !object.name().is_empty() => object.name(),
            Self::Unresolved { .. } => unresolved,
            _ => absent,
        }
    }
}

impl<'de, T: DeserializeOwned + Default> Deserialize<'de> for Relation<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::resolve(Some(&value)))
    }
}

/// Deserialize a text field, reading `null` as the empty string
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl<T: Serialize> Serialize for Relation<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Unresolved { iri } => serializer.serialize_str(iri),
            Self::Resolved(object) => object.serialize(serializer),
        }
    }
}
