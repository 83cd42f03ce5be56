use crate::doc_link::extract_report_url;
use crate::lookup::*;
use crate::models::Incident;
use serde_json::Value;
use thiserror::Error;

pub const UNDETERMINED_SEVERITY: &str = "undetermined";
pub const UNKNOWN_ENTITIES: &str = "unknown";

const SEVERITY: &str = "fields.customfield_10319.value";
const ENTITIES: &str = "fields.customfield_18555";
const DECLARE_DATE: &str = "fields.customfield_15087";
const IMPACT_START: &str = "fields.customfield_15191";
const DETECTION_METHOD: &str = "fields.customfield_12881.value";
const DETECTED: &str = "fields.customfield_12882";
const ALERTED: &str = "fields.customfield_12883";
const ACKNOWLEDGED: &str = "fields.customfield_12884";
const RESPONDED: &str = "fields.customfield_12885";
const MITIGATED: &str = "fields.customfield_12886";
const RESOLVED: &str = "fields.customfield_12887";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("issue {issue} has no `{path}`")]
    MissingField { issue: String, path: &'static str },
}

fn required(raw: &Value, path: &'static str) -> Result<String, NormalizeError> {
    lookup_string(raw, path).ok_or_else(|| NormalizeError::MissingField {
        issue: lookup_string_or(raw, "key", "<no key>"),
        path,
    })
}

/// Flattens one raw Jira issue into an [`Incident`].
///
/// Only `key`, `fields.status.name` and `fields.summary` are required; every
/// custom field falls back to its default when absent.
pub fn normalize_incident(base_url: &str, raw: &Value) -> Result<Incident, NormalizeError> {
    let key = required(raw, "key")?;
    let status = required(raw, "fields.status.name")?;
    let summary = required(raw, "fields.summary")?;

    // An absent entities field still goes through the split, giving ["unknown"].
    let entities = lookup_string_or(raw, ENTITIES, UNKNOWN_ENTITIES)
        .split(',')
        .map(str::to_string)
        .collect();

    Ok(Incident {
        jira_url: format!("{}/browse/{}", base_url.trim_end_matches('/'), key),
        key,
        status,
        summary,
        severity: lookup_string_or(raw, SEVERITY, UNDETERMINED_SEVERITY),
        entities,
        report_url: extract_report_url(lookup(raw, "fields.description")),
        declare_date: lookup_string(raw, DECLARE_DATE),
        impact_start: lookup_string(raw, IMPACT_START),
        detection_method: lookup_string(raw, DETECTION_METHOD),
        detected: lookup_string(raw, DETECTED),
        alerted: lookup_string(raw, ALERTED),
        acknowledged: lookup_string(raw, ACKNOWLEDGED),
        responded: lookup_string(raw, RESPONDED),
        mitigated: lookup_string(raw, MITIGATED),
        resolved: lookup_string(raw, RESOLVED),
    })
}

pub fn normalize_incidents(base_url: &str, raw: &[Value]) -> Result<Vec<Incident>, NormalizeError> {
    raw.iter()
        .map(|issue| normalize_incident(base_url, issue))
        .collect()
}
