use clap::{Parser, Subcommand};
use jira_incident_reports::config::{log_filter, JiraConfig};
use jira_incident_reports::jira_client::{JiraClient, SearchOptions};
use jira_incident_reports::normalize::normalize_incidents;
use jira_incident_reports::report::active::ActiveReport;
use jira_incident_reports::report::weekly::WeeklyOverview;
use jira_incident_reports::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Incident reports built from a Jira project.
///
/// Create an API token in Jira and set JIRA_URL, JIRA_USERNAME and
/// JIRA_PASSWORD in the environment or a `.env` file.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Jira project holding the incidents
    #[arg(long, default_value = "IIM")]
    project: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List recently resolved and active incidents
    Active,
    /// Write the weekly HTML overview
    Weekly {
        #[arg(long, default_value = "incident_overviews")]
        output_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = JiraConfig::from_env()?;
    let jira_client = JiraClient::new(config)?;

    let issues = jira_client.get_incidents(&cli.project, &SearchOptions::default())?;
    let incidents = normalize_incidents(jira_client.base_url(), &issues)?;
    let now = chrono::Local::now().fixed_offset();

    match cli.command {
        Command::Active => {
            let report = ActiveReport::build(&incidents, now.date_naive());
            report.write_to(&mut std::io::stdout().lock())?;
        }
        Command::Weekly { output_dir } => {
            let overview =
                WeeklyOverview::build(&incidents, jira_client.base_url(), &cli.project, now);
            println!(
                "From: {} to {}",
                overview.window.start.format("%Y-%m-%d"),
                overview.window.end.format("%Y-%m-%d")
            );
            let path = overview.write_to_dir(&output_dir)?;
            println!("Report written to: {}", path.display());
        }
    }
    Ok(())
}
