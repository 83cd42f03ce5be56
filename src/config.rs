use std::env;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const JIRA_URL: &str = "JIRA_URL";
pub const JIRA_USERNAME: &str = "JIRA_USERNAME";
pub const JIRA_PASSWORD: &str = "JIRA_PASSWORD";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Credentials and endpoint for the Jira instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JiraConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl JiraConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            username: username.into().trim().to_string(),
            password: password.into().trim().to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self::new(
            required(JIRA_URL)?,
            required(JIRA_USERNAME)?,
            required(JIRA_PASSWORD)?,
        ))
    }
}

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log filter from `RUST_LOG`-style directives, `info` when unset or invalid.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
