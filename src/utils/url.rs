use crate::error::{AnalyzerError, Result};
use crate::types::RepoId;

/// Extract owner and repository name from a repository URL.
///
/// Takes the last two `/`-separated segments after trimming surrounding
/// slashes, so `https://github.com/owner/repo/` and `owner/repo` both work.
/// Nothing else is validated.
pub fn parse_repo_url(url: &str) -> Result<RepoId> {
    let trimmed = url.trim().trim_matches('/');
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() < 2 {
        return Err(AnalyzerError::InvalidUrl(url.to_string()));
    }

    let owner = parts[parts.len() - 2];
    let repo = parts[parts.len() - 1];
    if owner.is_empty() || repo.is_empty() {
        return Err(AnalyzerError::InvalidUrl(url.to_string()));
    }

    Ok(RepoId::new(owner, repo))
}
