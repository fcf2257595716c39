//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing fetched repository data and the shapes derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a hosted repository, used as the fetch cache key.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct RepoId {
    /// The account that owns the repository
    pub owner: String,
    /// The repository name
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Repository metadata as returned by the primary repository call.
///
/// Timestamps keep the raw API form (`%Y-%m-%dT%H:%M:%SZ`) and are parsed
/// when displayed, so a malformed value fails at the point of use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub name: String,
    pub owner_login: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub watchers: u64,
    pub created_at: String,
    pub updated_at: String,
    /// Primary language reported by the platform
    pub language: Option<String>,
    pub license_name: Option<String>,
    /// Endpoint listing per-language byte counts
    pub languages_url: Option<String>,
}

/// A platform user and their number of accepted changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRecord {
    pub login: String,
    pub contributions: u64,
}

impl ContributorRecord {
    pub fn new(login: impl Into<String>, contributions: u64) -> Self {
        Self {
            login: login.into(),
            contributions,
        }
    }
}

/// Weekly commit totals, oldest week first.
pub type WeeklyCommitSeries = Vec<u64>;

/// Language name to byte count, in the order the API listed them.
pub type LanguageShareMap = Vec<(String, u64)>;

/// A language's percentage of a repository's total bytes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    pub percent: f64,
}

/// Everything fetched for one repository during one analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct RepoData {
    pub snapshot: RepositorySnapshot,
    /// Full commit history as returned by the API, unfiltered
    pub commits: WeeklyCommitSeries,
    /// Contributors in API order (descending by contributions)
    pub contributors: Vec<ContributorRecord>,
    pub languages: LanguageShareMap,
    pub readme: Option<String>,
}

/// Whether the dashboard shows one repository or compares two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnalysisMode {
    #[default]
    Single,
    Compare,
}

impl AnalysisMode {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Single => "Single Repository",
            AnalysisMode::Compare => "Repository Comparison",
        }
    }
}
