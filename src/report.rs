//! # Analysis Report
//!
//! Plaintext report offered for download for each analyzed repository.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::analysis::TOP_CONTRIBUTORS;
use crate::error::Result;
use crate::types::{ContributorRecord, RepositorySnapshot};
use crate::utils::format::format_api_date;

/// MIME type of the downloaded report.
pub const REPORT_MIME: &str = "text/plain";

const NO_DESCRIPTION: &str = "No description provided";
const SECTION_RULE_WIDTH: usize = 20;
const TITLE_RULE_WIDTH: usize = 50;

/// Build the report text.
///
/// `commits` is the full weekly series as fetched, not the timeframe the
/// user is looking at. Fails only when a snapshot timestamp cannot be
/// parsed.
pub fn generate_report(
    snapshot: &RepositorySnapshot,
    commits: &[u64],
    contributors: &[ContributorRecord],
    generated_at: NaiveDateTime,
) -> Result<String> {
    let section_rule = "-".repeat(SECTION_RULE_WIDTH);
    let mut report = Vec::new();

    report.push(format!("Repository Analysis Report for {}", snapshot.name));
    report.push("=".repeat(TITLE_RULE_WIDTH));
    report.push(format!(
        "\nGenerated on: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    report.push("\nRepository Metadata:".to_string());
    report.push(section_rule.clone());
    report.push(format!("Name: {}", snapshot.name));
    report.push(format!("Owner: {}", snapshot.owner_login));
    report.push(format!(
        "Description: {}",
        snapshot.description.as_deref().unwrap_or(NO_DESCRIPTION)
    ));
    report.push(format!("Stars: {}", snapshot.stars));
    report.push(format!("Forks: {}", snapshot.forks));
    report.push(format!("Open Issues: {}", snapshot.open_issues));
    report.push(format!("Watchers: {}", snapshot.watchers));
    report.push(format!(
        "Created: {}",
        format_api_date(&snapshot.created_at, "%Y-%m-%d")?
    ));
    report.push(format!(
        "Last Updated: {}",
        format_api_date(&snapshot.updated_at, "%Y-%m-%d")?
    ));

    report.push("\nTop Contributors:".to_string());
    report.push(section_rule.clone());
    for (rank, contributor) in contributors.iter().take(TOP_CONTRIBUTORS).enumerate() {
        report.push(format!(
            "{}. {}: {} contributions",
            rank + 1,
            contributor.login,
            contributor.contributions
        ));
    }

    report.push("\nWeekly Commit Activity (Last 52 weeks):".to_string());
    report.push(section_rule);
    for (week, total) in commits.iter().enumerate() {
        report.push(format!("Week {}: {} commits", week + 1, total));
    }

    Ok(report.join("\n"))
}

/// [`generate_report`] stamped with the local wall-clock time.
pub fn generate_report_now(
    snapshot: &RepositorySnapshot,
    commits: &[u64],
    contributors: &[ContributorRecord],
) -> Result<String> {
    generate_report(snapshot, commits, contributors, Local::now().naive_local())
}

/// File name the report is saved under.
pub fn report_file_name(repo_name: &str) -> String {
    format!("{repo_name}_analysis_report.txt")
}

/// Write a report into `dir`, creating it if needed, and return its path.
pub fn save_report(dir: &Path, repo_name: &str, report: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(repo_name));
    fs::write(&path, report)?;
    tracing::info!(path = %path.display(), "report saved");
    Ok(path)
}
