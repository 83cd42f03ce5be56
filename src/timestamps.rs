use chrono::{DateTime, FixedOffset, NaiveDate};

/// Jira's date-time format, e.g. `2025-01-31T15:06:00.000-0500`.
const JIRA_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

pub fn parse_jira_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, JIRA_DATETIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// Calendar date of a Jira date or date-time value, in the offset it was written with.
pub fn jira_date(raw: &str) -> Option<NaiveDate> {
    parse_jira_timestamp(raw)
        .map(|timestamp| timestamp.date_naive())
        .or_else(|| {
            raw.get(0..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

/// Drops the fraction and offset for display.
///
/// `2025-01-31T15:06:00.000-0500` becomes `2025-01-31 15:06:00`.
pub fn display_datestamp(raw: &str) -> String {
    match (raw.get(0..10), raw.get(11..19)) {
        (Some(date), Some(time)) => format!("{date} {time}"),
        _ => raw.to_string(),
    }
}
