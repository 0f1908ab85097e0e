//! Configuration
//!
//! Settings come from built-in defaults, an optional TOML file at
//! `~/.habityzer/config.toml`, and `HABITYZER_*` environment variables, in
//! increasing order of precedence. The resolved [`Config`] is immutable and
//! handed to the transport and the service at startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// API origin used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://s.habityzer.com/api";

/// Project used when none is configured or the value is unusable
pub const DEFAULT_PROJECT_ID: i64 = 2;

/// Environment variable for the API origin
pub const BASE_URL_VAR: &str = "HABITYZER_API_BASE_URL";

/// Environment variable for the bearer token
pub const TOKEN_VAR: &str = "HABITYZER_API_TOKEN";

/// Environment variable for the default project id
pub const PROJECT_ID_VAR: &str = "HABITYZER_PROJECT_ID";

/// Environment variable for the request timeout in seconds
pub const TIMEOUT_VAR: &str = "HABITYZER_TIMEOUT_SECS";

/// Environment variable overriding the config file location
pub const CONFIG_PATH_VAR: &str = "HABITYZER_CONFIG";

/// Errors while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No token in the environment or the config file
    #[error("HABITYZER_API_TOKEN is required (set it in the environment or in the [api] section of the config file)")]
    MissingToken,

    /// Config file exists but could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid TOML
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },
}

/// On-disk configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// API connection settings
    #[serde(default)]
    pub api: ApiSection,
}

/// `[api]` section of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    /// API origin, e.g. `https://s.habityzer.com/api`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Default project id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Load a config file; a missing file is an empty config
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API origin, without trailing slash
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: String,
    /// Project used for listings and new tasks
    pub project_id: i64,
    /// Per-request timeout; none means the client default
    pub timeout: Option<Duration>,
}

impl Config {
    /// Configuration with defaults for everything but origin and token
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            project_id: DEFAULT_PROJECT_ID,
            timeout: None,
        }
    }

    /// Set the default project
    #[must_use]
    pub fn with_project_id(mut self, project_id: i64) -> Self {
        self.project_id = project_id;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Path of the config file consulted by [`Config::load`]
    #[must_use]
    pub fn file_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_VAR).map_or_else(paths::global_config, PathBuf::from)
    }

    /// Load from the config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = ConfigFile::load(&Self::file_path())?;
        Self::resolve(&file, |key| std::env::var(key).ok())
    }

    /// Merge a config file with variables from `lookup`
    ///
    /// Variables win over the file. Blank values count as unset.
    pub fn resolve<F>(file: &ConfigFile, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = var(TOKEN_VAR)
            .or_else(|| file.api.token.clone().filter(|t| !t.trim().is_empty()))
            .ok_or(ConfigError::MissingToken)?;

        let base_url = var(BASE_URL_VAR)
            .or_else(|| file.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let project_id = var(PROJECT_ID_VAR)
            .as_deref()
            .and_then(parse_project_id)
            .or_else(|| file.api.project_id.filter(|id| *id > 0))
            .unwrap_or(DEFAULT_PROJECT_ID);

        let timeout = var(TIMEOUT_VAR)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .or(file.api.timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let mut config = Self::new(base_url, token.trim()).with_project_id(project_id);
        config.timeout = timeout;
        Ok(config)
    }
}

/// Parse a project id; anything but a positive integer is rejected
#[must_use]
pub fn parse_project_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}
