//! Task service - resource operations against the API
//!
//! Each operation composes the query builder and the relation codec with
//! exactly one transport call. What happens on failure is decided by
//! [`Operation::policy`]: listings degrade to an empty result, everything
//! that targets a single task propagates the error.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::config::Config;
use crate::core::models::{
    DEFAULT_PRIORITY, EntityId, Project, ResourceKind, Status, StatusId, Task, to_iri,
};
use crate::core::ports::{Method, Transport, TransportError};
use crate::core::query::{TaskFilter, build_task_query};

/// What a failed operation does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log and return an empty result
    Degrade,
    /// Log and hand the error to the caller
    Propagate,
}

/// Operations offered by [`TaskService`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /tasks?...`
    ListTasks,
    /// `GET /task_statuses?page=1`
    ListStatuses,
    /// `GET /projects?page=1`
    ListProjects,
    /// `GET /tasks/{id}`
    GetTask,
    /// `POST /tasks`
    CreateTask,
    /// `PATCH /tasks/{id}`
    UpdateTask,
    /// `DELETE /tasks/{id}`
    DeleteTask,
    /// `PATCH /tasks/{id}` with a new status
    MoveTask,
}

impl Operation {
    /// Failure policy for this operation
    #[must_use]
    pub const fn policy(self) -> ErrorPolicy {
        match self {
            Self::ListTasks | Self::ListStatuses | Self::ListProjects => ErrorPolicy::Degrade,
            Self::GetTask
            | Self::CreateTask
            | Self::UpdateTask
            | Self::DeleteTask
            | Self::MoveTask => ErrorPolicy::Propagate,
        }
    }

    /// Verb phrase used in diagnostics
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::ListTasks => "fetch tasks",
            Self::ListStatuses => "fetch task statuses",
            Self::ListProjects => "fetch projects",
            Self::GetTask => "fetch task",
            Self::CreateTask => "create task",
            Self::UpdateTask => "update task",
            Self::DeleteTask => "delete task",
            Self::MoveTask => "move task",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A failed operation: which one, on what, and the transport error
#[derive(Debug, Error)]
#[error("failed to {operation}{}: {source}", describe_target(.target.as_ref()))]
pub struct TaskError {
    /// Operation that failed
    pub operation: Operation,
    /// Task the operation targeted, if any
    pub target: Option<EntityId>,
    /// Underlying failure, unchanged
    #[source]
    pub source: TransportError,
}

impl TaskError {
    /// The transport failure behind this error
    #[must_use]
    pub const fn kind(&self) -> &TransportError {
        &self.source
    }
}

fn describe_target(target: Option<&EntityId>) -> String {
    target.map(|id| format!(" {id}")).unwrap_or_default()
}

/// Completion detection applied when moving a task
///
/// Decides from the raw status identifier whether the move completes the
/// task, in which case `completedAt` is sent along with the new status.
pub struct CompletionRule(Box<dyn Fn(&EntityId) -> bool + Send + Sync>);

impl CompletionRule {
    /// Custom rule
    pub fn new<F>(rule: F) -> Self
    where
        F: Fn(&EntityId) -> bool + Send + Sync + 'static,
    {
        Self(Box::new(rule))
    }

    /// Rule that never marks a move as completing
    #[must_use]
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Whether moving to `status` completes the task
    #[must_use]
    pub fn is_completion(&self, status: &EntityId) -> bool {
        (self.0)(status)
    }
}

impl Default for CompletionRule {
    fn default() -> Self {
        Self::new(mentions_completion)
    }
}

impl fmt::Debug for CompletionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompletionRule(..)")
    }
}

/// Default completion rule
///
/// Only textual identifiers qualify: those containing "complet" or equal to
/// "done", ignoring case. Numeric ids never do.
#[must_use]
pub fn mentions_completion(status: &EntityId) -> bool {
    status.as_text().is_some_and(|text| {
        let text = text.to_lowercase();
        text.contains("complet") || text == "done"
    })
}

/// Fields for a new task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Title (required)
    pub title: String,
    /// Description, empty when not given
    pub description: String,
    /// Initial status; Todo when not given
    pub status_id: Option<EntityId>,
    /// Priority
    pub priority: u32,
}

impl NewTask {
    /// New task with default description, status and priority
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status_id: None,
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the initial status
    #[must_use]
    pub fn with_status(mut self, status_id: impl Into<EntityId>) -> Self {
        self.status_id = Some(status_id.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Request body, with relations encoded as IRIs
    #[must_use]
    pub fn to_body(&self, project_id: &EntityId) -> Value {
        let status = self.status_id.clone().unwrap_or_else(|| StatusId::Todo.into());
        json!({
            "title": self.title,
            "description": self.description,
            "priority": self.priority,
            "status": to_iri(ResourceKind::TaskStatus, &status),
            "project": to_iri(ResourceKind::Project, project_id),
        })
    }
}

/// Unwrap a collection envelope
///
/// Returns the `member` array (or `hydra:member`) when present, the payload
/// itself otherwise. An empty body counts as an empty collection.
#[must_use]
pub fn collection_members(payload: Value) -> Value {
    match payload {
        Value::Null => Value::Array(Vec::new()),
        Value::Object(mut envelope) => {
            if let Some(members) = envelope.remove("member") {
                return members;
            }
            if let Some(members) = envelope.remove("hydra:member") {
                return members;
            }
            Value::Object(envelope)
        },
        other => other,
    }
}

/// Resource operations on tasks, statuses and projects
#[derive(Debug)]
pub struct TaskService<T> {
    transport: T,
    project_id: EntityId,
    completion: CompletionRule,
}

impl<T: Transport> TaskService<T> {
    /// Service over `transport`, using the configured default project
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            project_id: EntityId::Int(config.project_id),
            completion: CompletionRule::default(),
        }
    }

    /// Replace the completion rule used by [`TaskService::move_task_to_status`]
    #[must_use]
    pub fn with_completion_rule(mut self, rule: CompletionRule) -> Self {
        self.completion = rule;
        self
    }

    /// The underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Default project for listings and new tasks
    pub const fn project_id(&self) -> &EntityId {
        &self.project_id
    }

    /// List tasks matching `filter`; empty on failure
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        let path = format!("/tasks?{}", build_task_query(filter, Some(&self.project_id)));
        self.collection(Operation::ListTasks, &path).await
    }

    /// List task statuses; empty on failure
    pub async fn task_statuses(&self) -> Vec<Status> {
        self.collection(Operation::ListStatuses, "/task_statuses?page=1").await
    }

    /// List projects; empty on failure
    pub async fn projects(&self) -> Vec<Project> {
        self.collection(Operation::ListProjects, "/projects?page=1").await
    }

    /// Fetch one task with its relations embedded
    pub async fn get_task(&self, id: &EntityId) -> Result<Task, TaskError> {
        let op = Operation::GetTask;
        let result = self.entity(Method::Get, &task_path(id), None).await;
        settle(op, Some(id), result)
    }

    /// Create a task in the configured project
    pub async fn create_task(&self, task: &NewTask) -> Result<Task, TaskError> {
        let body = task.to_body(&self.project_id);
        let result = self.entity(Method::Post, "/tasks", Some(&body)).await;
        let created: Task = settle(Operation::CreateTask, None, result)?;
        log::debug!("created task {}: {}", created.id, created.title);
        Ok(created)
    }

    /// Merge-patch a task; only the given fields change
    pub async fn update_task(
        &self,
        id: &EntityId,
        updates: &Map<String, Value>,
    ) -> Result<Task, TaskError> {
        self.patch(Operation::UpdateTask, id, updates).await
    }

    /// Delete a task
    pub async fn delete_task(&self, id: &EntityId) -> Result<bool, TaskError> {
        let result = self.transport.request(Method::Delete, &task_path(id), None).await;
        settle(Operation::DeleteTask, Some(id), result)?;
        log::debug!("deleted task {id}");
        Ok(true)
    }

    /// Move a task to another status
    ///
    /// Sends the status IRI, plus `completedAt` set to now when the
    /// completion rule accepts `status`.
    pub async fn move_task_to_status(
        &self,
        id: &EntityId,
        status: &EntityId,
    ) -> Result<Task, TaskError> {
        let mut updates = Map::new();
        let iri = to_iri(ResourceKind::TaskStatus, status);
        updates.insert("status".to_string(), Value::String(iri));
        if self.completion.is_completion(status) {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            updates.insert("completedAt".to_string(), Value::String(now));
        }
        self.patch(Operation::MoveTask, id, &updates).await
    }

    async fn patch(
        &self,
        op: Operation,
        id: &EntityId,
        updates: &Map<String, Value>,
    ) -> Result<Task, TaskError> {
        let body = Value::Object(updates.clone());
        let result = self.entity(Method::Patch, &task_path(id), Some(&body)).await;
        let updated: Task = settle(op, Some(id), result)?;
        log::debug!("updated task {id}: {}", updated.title);
        Ok(updated)
    }

    async fn entity<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<R, TransportError> {
        let payload = self.transport.request(method, path, body).await?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn collection<R: DeserializeOwned>(&self, op: Operation, path: &str) -> Vec<R> {
        let result = match self.transport.request(Method::Get, path, None).await {
            Ok(payload) => decode_members(op, payload),
            Err(err) => Err(err),
        };
        degrade(op, settle(op, None, result))
    }
}

/// Decode the members of a collection one by one
///
/// A payload that is not a sequence is a decode error. A member that does not
/// decode is skipped with a warning; the rest of the listing is kept.
fn decode_members<R: DeserializeOwned>(
    op: Operation,
    payload: Value,
) -> Result<Vec<R>, TransportError> {
    let members: Vec<Value> = serde_json::from_value(collection_members(payload))?;
    Ok(members
        .into_iter()
        .filter_map(|member| match serde_json::from_value(member) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                log::warn!("skipping malformed entry while trying to {op}: {err}");
                None
            },
        })
        .collect())
}

/// Attach context to a failure and log it
fn settle<R>(
    operation: Operation,
    target: Option<&EntityId>,
    result: Result<R, TransportError>,
) -> Result<R, TaskError> {
    result.map_err(|source| {
        let err = TaskError {
            operation,
            target: target.cloned(),
            source,
        };
        log::error!("{err}");
        err
    })
}

/// Apply the degrade policy: a failure becomes the empty result
fn degrade<R: Default>(op: Operation, result: Result<R, TaskError>) -> R {
    debug_assert_eq!(op.policy(), ErrorPolicy::Degrade, "{op} must not swallow errors");
    result.unwrap_or_default()
}

fn task_path(id: &EntityId) -> String {
    format!("/{}/{id}", ResourceKind::Task.plural())
}
