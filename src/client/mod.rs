//! # Remote Data Client
//!
//! [`RepoSource`] is the boundary between the dashboard and the hosting
//! platform. [`GitHubClient`] is the live implementation; tests substitute
//! in-memory sources.

mod github;

use futures::future::BoxFuture;

use crate::config::RequestContext;
use crate::error::Result;
use crate::types::{ContributorRecord, LanguageShareMap, RepoId, RepositorySnapshot, WeeklyCommitSeries};

pub use github::GitHubClient;

/// Boxed future returned by [`RepoSource`] methods, keeping the trait dyn-compatible.
pub type FetchFuture<'a, T> = BoxFuture<'a, Result<T>>;

/// Fetches raw repository data from a hosting platform.
///
/// Every call gets the caller's [`RequestContext`]; implementations never
/// read credentials from anywhere else.
pub trait RepoSource: Send + Sync {
    /// Repository metadata. Failure here is fatal to the analysis.
    fn repository<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, RepositorySnapshot>;

    /// Weekly commit totals, oldest first.
    fn commit_activity<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, WeeklyCommitSeries>;

    /// Contributors, most active first.
    fn contributors<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, Vec<ContributorRecord>>;

    /// Decoded README text.
    fn readme<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, String>;

    /// Per-language byte counts from the repository's `languages_url`.
    fn languages<'a>(&'a self, ctx: &'a RequestContext, languages_url: &'a str) -> FetchFuture<'a, LanguageShareMap>;
}
