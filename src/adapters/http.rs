//! HTTP transport over reqwest
//!
//! Sends bearer-authenticated JSON requests and maps the outcome onto
//! [`TransportError`]. One attempt per call.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use serde_json::Value;

use crate::config::Config;
use crate::core::ports::{JSON_LD, Method, Transport, TransportError};

/// Join the base URL and a request path with exactly one `/` between them
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// reqwest implementation of [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpTransport {
    /// Build a transport from the resolved configuration
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut builder =
            Client::builder().user_agent(concat!("habityzer/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::network)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Origin requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let url = join_url(&self.base_url, path);

        let mut request = self
            .client
            .request(to_reqwest(method), &url)
            .bearer_auth(&self.token)
            .header(ACCEPT, JSON_LD)
            .header(CONTENT_TYPE, method.content_type());

        if let Some(body) = body.filter(|_| method.sends_body()) {
            let payload = serde_json::to_vec(body)?;
            request = request.header(CONTENT_LENGTH, payload.len()).body(payload);
        }

        let response = request.send().await.map_err(TransportError::network)?;
        let status = response.status();
        let text = response.text().await.map_err(TransportError::network)?;

        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                code: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
