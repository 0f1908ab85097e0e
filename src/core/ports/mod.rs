//! Port traits (interfaces) for external dependencies
//!
//! The resource operations depend only on these traits, never on the HTTP
//! client directly. The reqwest implementation lives in `adapters`.

mod transport;

pub use transport::{JSON, JSON_LD, MERGE_PATCH_JSON, Method, Transport, TransportError};
