//! Console listing of recently resolved and still-active incidents.

use crate::models::Incident;
use crate::timestamps::{display_datestamp, jira_date};
use chrono::{Days, NaiveDate};
use std::io::{self, Write};

pub const RECENTLY_RESOLVED_DAYS: u64 = 14;

pub struct ActiveReport<'a> {
    pub recently_resolved: Vec<&'a Incident>,
    pub active: Vec<&'a Incident>,
}

fn resolved_since(incident: &Incident, cutoff: NaiveDate) -> bool {
    incident
        .resolved
        .as_deref()
        .and_then(jira_date)
        .is_some_and(|resolved| resolved >= cutoff)
}

impl<'a> ActiveReport<'a> {
    pub fn build(incidents: &'a [Incident], today: NaiveDate) -> Self {
        let cutoff = today
            .checked_sub_days(Days::new(RECENTLY_RESOLVED_DAYS))
            .unwrap_or(NaiveDate::MIN);

        Self {
            recently_resolved: incidents
                .iter()
                .filter(|incident| resolved_since(incident, cutoff))
                .collect(),
            active: incidents
                .iter()
                .filter(|incident| !incident.is_resolved())
                .collect(),
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "# Recently resolved incidents ({}):", self.recently_resolved.len())?;
        writeln!(out)?;
        for incident in &self.recently_resolved {
            write_heading(out, incident)?;
            if let Some(resolved) = incident.resolved.as_deref() {
                writeln!(out, "resolved: {}", display_datestamp(resolved))?;
            }
            write_links(out, incident)?;
        }

        writeln!(out)?;
        writeln!(out, "# Active incidents ({}):", self.active.len())?;
        writeln!(out)?;
        for incident in &self.active {
            write_heading(out, incident)?;
            if let Some(declared) = incident.declare_date.as_deref() {
                writeln!(out, "declared: {}", display_datestamp(declared))?;
            }
            write_links(out, incident)?;
        }
        Ok(())
    }
}

fn write_heading<W: Write>(out: &mut W, incident: &Incident) -> io::Result<()> {
    writeln!(
        out,
        "{}  {}  ({})",
        incident.key,
        incident.summary,
        incident.entities_label()
    )
}

fn write_links<W: Write>(out: &mut W, incident: &Incident) -> io::Result<()> {
    writeln!(out, "{}", incident.jira_url)?;
    writeln!(out, "{}", incident.report_url)?;
    writeln!(out)
}
