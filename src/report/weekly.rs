//! Weekly incident overview: new incidents in the Friday-to-Friday window,
//! still-active incidents, a severity breakdown and TTD/TTM per incident.

use super::ReportError;
use crate::doc_link::NO_DOC;
use crate::duration::humanize;
use crate::links::issue_list_link;
use crate::models::{Incident, TimedIncident};
use crate::timestamps::{display_datestamp, jira_date, parse_jira_timestamp};
use askama::Template;
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate};
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};

pub const SEVERITY_BUCKETS: [&str; 4] = ["S1", "S2", "S3", "S4"];
pub const UNKNOWN_TIMING: &str = "?";
pub const ONGOING_SUFFIX: &str = " (ongoing)";

/// Half-open reporting window `[start, end)`, both Fridays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// The window ending on the Friday of `today`'s Monday-based week.
    pub fn ending_this_week(today: NaiveDate) -> Self {
        let monday = today - Days::new(today.weekday().num_days_from_monday() as u64);
        let end = monday + Days::new(4);
        Self {
            start: end - Days::new(7),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

fn parse_field(
    incident: &Incident,
    name: &str,
    raw: Option<&str>,
) -> Option<DateTime<FixedOffset>> {
    let raw = raw?;
    let parsed = parse_jira_timestamp(raw);
    if parsed.is_none() {
        tracing::warn!(key = %incident.key, field = name, value = raw, "unparseable timestamp");
    }
    parsed
}

/// TTD runs from impact start (or detection) to detection; TTM from the same
/// start to mitigation, or to `now` when the incident is still unmitigated.
pub fn compute_timings(incident: &Incident, now: DateTime<FixedOffset>) -> TimedIncident {
    let detected = parse_field(incident, "detected", incident.detected.as_deref());
    let start =
        parse_field(incident, "impact_start", incident.impact_start.as_deref()).or(detected);

    let (ttd, ttm) = match start {
        None => (UNKNOWN_TIMING.to_string(), UNKNOWN_TIMING.to_string()),
        Some(start) => {
            let ttd = detected
                .map(|detected| humanize(detected - start))
                .unwrap_or_else(|| UNKNOWN_TIMING.to_string());
            let ttm = match parse_field(incident, "mitigated", incident.mitigated.as_deref()) {
                Some(mitigated) => humanize(mitigated - start),
                None => format!("{}{}", humanize(now - start), ONGOING_SUFFIX),
            };
            (ttd, ttm)
        }
    };

    TimedIncident {
        incident: incident.clone(),
        ttd,
        ttm,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeverityBreakdown {
    counts: [usize; 4],
}

impl SeverityBreakdown {
    pub fn from_incidents<'a, I>(incidents: I) -> Self
    where
        I: IntoIterator<Item = &'a Incident>,
    {
        let by_severity = incidents
            .into_iter()
            .map(|incident| incident.severity.as_str())
            .counts();
        let mut counts = [0; 4];
        for (slot, bucket) in counts.iter_mut().zip(SEVERITY_BUCKETS) {
            *slot = by_severity.get(bucket).copied().unwrap_or(0);
        }
        Self { counts }
    }

    pub fn count(&self, bucket: &str) -> usize {
        SEVERITY_BUCKETS
            .iter()
            .position(|known| *known == bucket)
            .map(|i| self.counts[i])
            .unwrap_or(0)
    }
}

pub struct WeeklyOverview {
    pub window: ReportWindow,
    pub new_incidents: Vec<TimedIncident>,
    pub active_incidents: Vec<TimedIncident>,
    pub severity: SeverityBreakdown,
    pub new_incidents_link: String,
    pub active_incidents_link: String,
}

impl WeeklyOverview {
    pub fn build(
        incidents: &[Incident],
        base_url: &str,
        project_key: &str,
        now: DateTime<FixedOffset>,
    ) -> Self {
        let window = ReportWindow::ending_this_week(now.date_naive());

        let new: Vec<&Incident> = incidents
            .iter()
            .filter(|incident| {
                incident
                    .declare_date
                    .as_deref()
                    .and_then(jira_date)
                    .is_some_and(|declared| window.contains(declared))
            })
            .collect();
        let active: Vec<&Incident> = incidents
            .iter()
            .filter(|incident| !incident.is_resolved())
            .collect();

        let link = |list: &[&Incident]| {
            let keys = list
                .iter()
                .map(|incident| incident.key.as_str())
                .collect::<Vec<_>>();
            issue_list_link(base_url, project_key, &keys)
        };

        let timed = |list: &[&Incident]| {
            list.iter()
                .map(|incident| compute_timings(incident, now))
                .collect::<Vec<_>>()
        };

        Self {
            window,
            severity: SeverityBreakdown::from_incidents(new.iter().copied()),
            new_incidents_link: link(&new),
            active_incidents_link: link(&active),
            new_incidents: timed(&new),
            active_incidents: timed(&active),
        }
    }

    pub fn title(&self) -> String {
        format!("Weekly Incident Overview: {}", self.window.end.format("%Y-%m-%d"))
    }

    pub fn file_name(&self) -> String {
        format!("incident_overview_{}.html", self.window.end.format("%Y%m%d"))
    }

    /// Renders the overview with every stylesheet rule inlined into `style` attributes.
    pub fn render_html(&self) -> Result<String, ReportError> {
        let html = OverviewTemplate::new(self).render()?;
        Ok(css_inline::inline(&html)?)
    }

    /// Writes the rendered overview into `dir`, creating it if needed.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let html = self.render_html()?;
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, html)?;
        Ok(path)
    }
}

struct IncidentRow<'a> {
    key: &'a str,
    jira_url: &'a str,
    summary: &'a str,
    status: &'a str,
    severity: &'a str,
    entities: String,
    report_url: Option<&'a str>,
    declared: String,
    ttd: &'a str,
    ttm: &'a str,
    ongoing: bool,
}

impl<'a> From<&'a TimedIncident> for IncidentRow<'a> {
    fn from(timed: &'a TimedIncident) -> Self {
        let incident = &timed.incident;
        Self {
            key: &incident.key,
            jira_url: &incident.jira_url,
            summary: &incident.summary,
            status: &incident.status,
            severity: &incident.severity,
            entities: incident.entities_label(),
            report_url: Some(incident.report_url.as_str()).filter(|url| *url != NO_DOC),
            declared: incident
                .declare_date
                .as_deref()
                .map(display_datestamp)
                .unwrap_or_default(),
            ttd: &timed.ttd,
            ttm: &timed.ttm,
            ongoing: timed.ttm.ends_with(ONGOING_SUFFIX),
        }
    }
}

#[derive(Template)]
#[template(path = "incident_overview.html")]
struct OverviewTemplate<'a> {
    title: String,
    last_friday: String,
    this_friday: String,
    num_incidents: usize,
    num_s1_incidents: usize,
    num_s2_incidents: usize,
    num_s3_incidents: usize,
    num_s4_incidents: usize,
    new_incidents: Vec<IncidentRow<'a>>,
    new_incidents_link: &'a str,
    active_incidents: Vec<IncidentRow<'a>>,
    active_incidents_link: &'a str,
}

impl<'a> OverviewTemplate<'a> {
    fn new(overview: &'a WeeklyOverview) -> Self {
        Self {
            title: overview.title(),
            last_friday: overview.window.start.format("%Y-%m-%d").to_string(),
            this_friday: overview.window.end.format("%Y-%m-%d").to_string(),
            num_incidents: overview.new_incidents.len(),
            num_s1_incidents: overview.severity.count("S1"),
            num_s2_incidents: overview.severity.count("S2"),
            num_s3_incidents: overview.severity.count("S3"),
            num_s4_incidents: overview.severity.count("S4"),
            new_incidents: overview.new_incidents.iter().map(IncidentRow::from).collect(),
            new_incidents_link: &overview.new_incidents_link,
            active_incidents: overview.active_incidents.iter().map(IncidentRow::from).collect(),
            active_incidents_link: &overview.active_incidents_link,
        }
    }
}
