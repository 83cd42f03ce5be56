use serde::Deserialize;
use serde_json::Value;

/// One page of the enhanced JQL search endpoint.
#[derive(Deserialize, Debug)]
pub struct SearchPage {
    #[serde(default)]
    pub issues: Vec<Value>,
    #[serde(rename = "isLast", default)]
    pub is_last: bool,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// Flat view of a Jira incident issue.
///
/// Timestamp fields hold Jira's raw date-time strings, e.g.
/// `2025-01-31T15:06:00.000-0500`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Incident {
    pub key: String,
    pub jira_url: String,
    pub status: String,
    pub summary: String,
    pub severity: String,
    pub entities: Vec<String>,
    pub report_url: String,
    pub declare_date: Option<String>,
    pub impact_start: Option<String>,
    pub detection_method: Option<String>,
    pub detected: Option<String>,
    pub alerted: Option<String>,
    pub acknowledged: Option<String>,
    pub responded: Option<String>,
    pub mitigated: Option<String>,
    pub resolved: Option<String>,
}

pub const RESOLVED_STATUS: &str = "Resolved";

impl Incident {
    pub fn is_resolved(&self) -> bool {
        self.status == RESOLVED_STATUS
    }

    pub fn entities_label(&self) -> String {
        self.entities.join(", ")
    }
}

/// An incident with its time-to-detect and time-to-mitigate rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedIncident {
    pub incident: Incident,
    pub ttd: String,
    pub ttm: String,
}
