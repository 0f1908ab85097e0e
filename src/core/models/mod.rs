//! Domain models for habityzer
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Task`] - A unit of work tracked by the API
//! - [`Status`] - A workflow column a task sits in
//! - [`Project`] - The project a task belongs to
//! - [`Relation`] - A reference to another resource, resolved or not
//! - [`EntityId`] - An integer or textual identifier

mod id;
mod project;
mod relation;
mod status;
mod task;

pub use id::EntityId;
pub use project::Project;
pub use relation::{Named, Relation, ResourceKind, to_iri};
pub use status::{ACTIVE_STATUSES, Status, StatusId};
pub use task::{DEFAULT_PRIORITY, Task};
