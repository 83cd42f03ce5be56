use crate::config::ConfigError;
use crate::jira_client::JiraError;
use crate::normalize::NormalizeError;
use crate::report::ReportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Jira(#[from] JiraError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Failed to write to console: {0}")]
    Console(#[from] std::io::Error),
}
