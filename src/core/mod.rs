//! Core domain logic for habityzer
//!
//! Everything here is independent of the HTTP stack. Network access goes
//! through the [`ports::Transport`] trait so the operations can be driven by
//! a fake in tests.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Task, Status, Project) and the relation codec
//! - `query` - Query-string construction for task listings
//! - `ports/` - Trait definitions for external dependencies
//! - `services/` - Resource operations composed from the pieces above

pub mod models;
pub mod ports;
pub mod query;
pub mod services;
