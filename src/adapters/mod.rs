//! Adapter implementations for port traits
//!
//! - `http` - reqwest-backed [`Transport`](crate::core::ports::Transport)

pub mod http;

pub use http::{HttpTransport, join_url};
