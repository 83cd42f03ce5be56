use crate::config::JiraConfig;
use crate::models::*;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SEARCH_PATH: &str = "/rest/api/3/search/jql";

#[derive(Error, Debug)]
pub enum JiraError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Jira request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Paging and field selection for issue searches.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    pub max_results: u32,
    pub fields: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 100,
            fields: "*all".to_string(),
        }
    }
}

pub fn incidents_jql(project_key: &str) -> String {
    format!(r#"project = "{project_key}" and issueType = "Incident" ORDER BY created ASC"#)
}

pub struct JiraClient {
    client: reqwest::blocking::Client,
    config: JiraConfig,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self, JiraError> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    /// Like [`JiraClient::new`] with a per-request timeout other than 30 s.
    pub fn with_timeout(config: JiraConfig, timeout: Duration) -> Result<Self, JiraError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(JiraError::Client)?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn get_page(
        &self,
        jql: &str,
        options: &SearchOptions,
        next_page_token: Option<&str>,
    ) -> Result<SearchPage, JiraError> {
        let url = format!("{}{}", self.config.base_url, SEARCH_PATH);
        let max_results = options.max_results.to_string();

        let mut params = vec![
            ("jql", jql),
            ("maxResults", max_results.as_str()),
            ("fields", options.fields.as_str()),
        ];
        if let Some(token) = next_page_token {
            params.push(("nextPageToken", token));
        }

        let page = self
            .client
            .get(url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .query(&params)
            .send()?
            .error_for_status()?
            .json::<SearchPage>()?;
        Ok(page)
    }

    /// Runs a JQL search and follows `nextPageToken` until the last page.
    ///
    /// Any failed request aborts the whole search. A non-final page without a
    /// token ends the search with what has been collected so far.
    pub fn search(&self, jql: &str, options: &SearchOptions) -> Result<Vec<Value>, JiraError> {
        let mut issues: Vec<Value> = Vec::new();
        let mut next_page_token: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = self.get_page(jql, options, next_page_token.as_deref())?;
            pages += 1;
            tracing::debug!(
                page = pages,
                issues = page.issues.len(),
                is_last = page.is_last,
                "fetched search page"
            );

            issues.extend(page.issues);

            if page.is_last {
                break;
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => next_page_token = Some(token),
                _ => {
                    tracing::warn!(
                        page = pages,
                        "Jira reported more results but sent no nextPageToken; stopping"
                    );
                    break;
                }
            }
        }

        tracing::info!(pages, issues = issues.len(), "search complete");
        Ok(issues)
    }

    pub fn get_incidents(
        &self,
        project_key: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Value>, JiraError> {
        self.search(&incidents_jql(project_key), options)
    }
}
