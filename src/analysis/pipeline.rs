//! Fetch and shape stages.
//!
//! Fetching talks to a [`RepoSource`] and is the only stage that can fail.
//! Shaping is pure and cheap, so it is re-run whenever the timeframe or
//! the username filter changes.

use std::future::Future;
use std::time::Instant;

use crate::analysis::contributors::filter_contributors;
use crate::analysis::languages::language_shares;
use crate::analysis::timeframe::{filter_commits_by_timeframe, Timeframe};
use crate::client::RepoSource;
use crate::config::RequestContext;
use crate::error::Result;
use crate::types::{ContributorRecord, LanguageShare, RepoData, RepoId};

/// Fetch everything shown for one repository.
///
/// The metadata call is fatal. Commit activity, contributors, languages and
/// the README degrade to empty values when their call fails.
pub async fn fetch_repo(source: &dyn RepoSource, ctx: &RequestContext, id: &RepoId) -> Result<RepoData> {
    let start_time = Instant::now();
    tracing::info!(repo = %id, "fetching repository");

    let snapshot = source.repository(ctx, id).await.map_err(|e| {
        tracing::error!(repo = %id, error = %e, "repository lookup failed");
        e
    })?;

    let commits = degrade(id, "commit activity", source.commit_activity(ctx, id))
        .await
        .unwrap_or_default();
    let contributors = degrade(id, "contributors", source.contributors(ctx, id))
        .await
        .unwrap_or_default();
    let languages = match snapshot.languages_url.as_deref() {
        Some(url) => degrade(id, "languages", source.languages(ctx, url))
            .await
            .unwrap_or_default(),
        None => Vec::new(),
    };
    let readme = degrade(id, "README", source.readme(ctx, id)).await;

    tracing::info!(
        repo = %id,
        weeks = commits.len(),
        contributors = contributors.len(),
        languages = languages.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "repository fetched"
    );

    Ok(RepoData {
        snapshot,
        commits,
        contributors,
        languages,
        readme,
    })
}

/// Fetch two repositories concurrently; each side keeps its own outcome.
pub async fn fetch_pair(
    source: &dyn RepoSource,
    ctx: &RequestContext,
    first: &RepoId,
    second: &RepoId,
) -> (Result<RepoData>, Result<RepoData>) {
    tokio::join!(fetch_repo(source, ctx, first), fetch_repo(source, ctx, second))
}

async fn degrade<T>(id: &RepoId, what: &str, call: impl Future<Output = Result<T>>) -> Option<T> {
    match call.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(repo = %id, error = %e, "could not fetch {what}, continuing without it");
            None
        }
    }
}

/// User-controlled view settings that never require a refetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub timeframe: Timeframe,
    pub username_filter: String,
}

impl ViewOptions {
    pub fn filter(&self) -> Option<&str> {
        (!self.username_filter.is_empty()).then_some(self.username_filter.as_str())
    }
}

/// Display-ready data for one repository.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedView<'a> {
    /// Weekly totals inside the selected timeframe, oldest first
    pub commits: &'a [u64],
    pub contributors: Vec<&'a ContributorRecord>,
    pub languages: Vec<LanguageShare>,
}

/// Apply the view options to fetched data.
pub fn shape<'a>(data: &'a RepoData, options: &ViewOptions) -> ShapedView<'a> {
    ShapedView {
        commits: filter_commits_by_timeframe(&data.commits, options.timeframe.weeks()),
        contributors: filter_contributors(&data.contributors, options.filter()),
        languages: language_shares(&data.languages),
    }
}
