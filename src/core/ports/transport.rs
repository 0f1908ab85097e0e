//! Transport port
//!
//! One call, one HTTP request. No retries and no logging at this layer.

use std::error::Error as StdError;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Plain JSON media type
pub const JSON: &str = "application/json";

/// JSON merge-patch media type (RFC 7396)
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// JSON-LD media type accepted on every response
pub const JSON_LD: &str = "application/ld+json";

/// HTTP methods used by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read
    Get,
    /// Create
    Post,
    /// Merge-patch update
    Patch,
    /// Remove
    Delete,
}

impl Method {
    /// Upper-case method name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether a request body is sent with this method
    #[must_use]
    pub const fn sends_body(self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }

    /// `Content-Type` header for this method
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Patch => MERGE_PATCH_JSON,
            _ => JSON,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors a single request can fail with
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, DNS or timeout failure
    #[error("network error: {0}")]
    Network(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-2xx response
    #[error("HTTP {code}: {body}")]
    HttpStatus {
        /// Status code
        code: u16,
        /// Raw response body
        body: String,
    },

    /// 2xx response whose body is not the expected JSON
    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    /// Wrap any error as a network failure
    pub fn network(cause: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Network(cause.into())
    }

    /// Status code, for HTTP status failures
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Issues requests against the API
///
/// `path` is relative to the configured base URL and may carry a query
/// string. A 2xx response with an empty body yields `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, TransportError>;
}
