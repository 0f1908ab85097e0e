//! Query-string construction for task listings
//!
//! The backend filters collections with bracketed array keys
//! (`status[]`, `project[]`) whose values are IRIs. Repeated keys keep the
//! order they were appended in.

use std::fmt;

use url::form_urlencoded;

use crate::core::models::{ACTIVE_STATUSES, EntityId, ResourceKind, StatusId, to_iri};

/// Key carrying the page marker
pub const PAGE_KEY: &str = "page";

/// Key for the status array filter
pub const STATUS_KEY: &str = "status[]";

/// Key for the project array filter
pub const PROJECT_KEY: &str = "project[]";

/// Filter for listing tasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Explicit status ids. `Some(vec![])` asks for no status filter at all.
    pub status_ids: Option<Vec<EntityId>>,
    /// Return every status instead of the active ones
    pub include_all: bool,
    /// Project to filter on (falls back to the configured project)
    pub project_id: Option<EntityId>,
}

impl TaskFilter {
    /// Default view: active tasks of the configured project
    #[must_use]
    pub fn active() -> Self {
        Self::default()
    }

    /// Only the given statuses, in this order
    #[must_use]
    pub fn statuses<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EntityId>,
    {
        Self {
            status_ids: Some(ids.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Every status
    #[must_use]
    pub fn all() -> Self {
        Self {
            include_all: true,
            ..Self::default()
        }
    }

    /// Restrict to a project
    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<EntityId>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

/// Ordered list of query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty parameter list
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a parameter, keeping earlier values for the same key
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// All pairs in insertion order
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Every value for `key`, in insertion order
    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str()).collect()
    }
}

/// Renders as `application/x-www-form-urlencoded`
impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        f.write_str(&encoded)
    }
}

/// Build the parameters for a task listing
///
/// Status resolution, first match wins:
/// 1. explicit ids, one `status[]` per id in the given order
/// 2. `include_all`, no status parameter
/// 3. otherwise Todo and In Progress
#[must_use]
pub fn task_query_params(filter: &TaskFilter, default_project: Option<&EntityId>) -> QueryParams {
    let mut params = QueryParams::new();
    params.append(PAGE_KEY, "1");

    if let Some(project) = filter.project_id.as_ref().or(default_project) {
        params.append(PROJECT_KEY, to_iri(ResourceKind::Project, project));
    }

    if let Some(ids) = &filter.status_ids {
        for id in ids {
            params.append(STATUS_KEY, to_iri(ResourceKind::TaskStatus, id));
        }
    } else if !filter.include_all {
        for status in ACTIVE_STATUSES {
            params.append(STATUS_KEY, to_iri(ResourceKind::TaskStatus, status.id()));
        }
    }

    params
}

/// Build the encoded query string for a task listing
#[must_use]
pub fn build_task_query(filter: &TaskFilter, default_project: Option<&EntityId>) -> String {
    task_query_params(filter, default_project).to_string()
}

/// Named views offered by `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListView {
    /// Todo and In Progress
    #[default]
    Active,
    /// Todo only
    Todo,
    /// In Progress only
    InProgress,
    /// Done only
    Done,
    /// Ideas only
    Ideas,
    /// Every status
    All,
}

impl ListView {
    /// Parse a CLI filter word; unknown words fall back to the active view
    #[must_use]
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg.map(str::to_lowercase).as_deref() {
            Some("done" | "completed") => Self::Done,
            Some("todo") => Self::Todo,
            Some("progress" | "in-progress") => Self::InProgress,
            Some("idea" | "ideas") => Self::Ideas,
            Some("all") => Self::All,
            _ => Self::Active,
        }
    }

    /// The filter this view requests
    #[must_use]
    pub fn filter(self) -> TaskFilter {
        match self {
            Self::Active => TaskFilter::active(),
            Self::Todo => TaskFilter::statuses([StatusId::Todo]),
            Self::InProgress => TaskFilter::statuses([StatusId::InProgress]),
            Self::Done => TaskFilter::statuses([StatusId::Done]),
            Self::Ideas => TaskFilter::statuses([StatusId::Idea]),
            Self::All => TaskFilter::all(),
        }
    }

    /// Heading printed above the listing
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Active => "Active Tasks (Todo & In-Progress)",
            Self::Todo => "Todo Tasks",
            Self::InProgress => "In Progress Tasks",
            Self::Done => "Completed Tasks",
            Self::Ideas => "Ideas",
            Self::All => "All Tasks (All Statuses)",
        }
    }
}
