//! Live [`RepoSource`] backed by the GitHub REST API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{FetchFuture, RepoSource};
use crate::config::{Config, RequestContext};
use crate::error::{AnalyzerError, Result};
use crate::types::{ContributorRecord, LanguageShareMap, RepoId, RepositorySnapshot, WeeklyCommitSeries};

const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT_HEADER: &str = concat!("repostats/", env!("CARGO_PKG_VERSION"));

/// GitHub REST API client.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn repo_url(&self, id: &RepoId) -> String {
        format!("{}/repos/{}/{}", self.base_url, id.owner, id.repo)
    }

    fn request(&self, ctx: &RequestContext, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .get(url)
            .header(USER_AGENT, USER_AGENT_HEADER)
            .header(ACCEPT, ACCEPT_HEADER);
        match &ctx.token {
            Some(token) => builder.header(AUTHORIZATION, format!("token {token}")),
            None => builder,
        }
    }

    /// GET `url` and return the body, failing on anything but 200.
    async fn get_text(&self, ctx: &RequestContext, url: &str) -> Result<String> {
        tracing::debug!(%url, "GET");
        let response = self.request(ctx, url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(api_error(status, &body));
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, ctx: &RequestContext, url: &str) -> Result<T> {
        let body = self.get_text(ctx, url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_API_URL)
    }
}

#[derive(Deserialize)]
struct RepoResponse {
    name: String,
    owner: OwnerResponse,
    description: Option<String>,
    stargazers_count: u64,
    forks_count: u64,
    open_issues_count: u64,
    watchers_count: u64,
    created_at: String,
    updated_at: String,
    language: Option<String>,
    license: Option<LicenseResponse>,
    languages_url: Option<String>,
}

#[derive(Deserialize)]
struct OwnerResponse {
    login: String,
}

#[derive(Deserialize)]
struct LicenseResponse {
    name: Option<String>,
}

#[derive(Deserialize)]
struct WeekResponse {
    total: u64,
}

#[derive(Deserialize)]
struct ContributorResponse {
    login: String,
    contributions: u64,
}

#[derive(Deserialize)]
struct ReadmeResponse {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

impl From<RepoResponse> for RepositorySnapshot {
    fn from(repo: RepoResponse) -> Self {
        Self {
            name: repo.name,
            owner_login: repo.owner.login,
            description: repo.description.filter(|d| !d.is_empty()),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            watchers: repo.watchers_count,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            language: repo.language,
            license_name: repo.license.and_then(|l| l.name),
            languages_url: repo.languages_url,
        }
    }
}

impl RepoSource for GitHubClient {
    fn repository<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, RepositorySnapshot> {
        Box::pin(async move {
            let repo: RepoResponse = self.get_json(ctx, &self.repo_url(id)).await?;
            Ok(repo.into())
        })
    }

    fn commit_activity<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, WeeklyCommitSeries> {
        Box::pin(async move {
            let url = format!("{}/stats/commit_activity", self.repo_url(id));
            let weeks: Vec<WeekResponse> = self.get_json(ctx, &url).await?;
            Ok(weeks.into_iter().map(|w| w.total).collect())
        })
    }

    fn contributors<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, Vec<ContributorRecord>> {
        Box::pin(async move {
            let url = format!("{}/contributors", self.repo_url(id));
            let contributors: Vec<ContributorResponse> = self.get_json(ctx, &url).await?;
            Ok(contributors
                .into_iter()
                .map(|c| ContributorRecord::new(c.login, c.contributions))
                .collect())
        })
    }

    fn readme<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, String> {
        Box::pin(async move {
            let url = format!("{}/readme", self.repo_url(id));
            let readme: ReadmeResponse = self.get_json(ctx, &url).await?;
            decode_readme(&readme.content)
        })
    }

    fn languages<'a>(&'a self, ctx: &'a RequestContext, languages_url: &'a str) -> FetchFuture<'a, LanguageShareMap> {
        Box::pin(async move {
            let body = self.get_text(ctx, languages_url).await?;
            parse_languages(&body)
        })
    }
}

/// Build an API error from a non-200 response, preferring the body's `message`.
pub(crate) fn api_error(status: StatusCode, body: &str) -> AnalyzerError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_default();
    AnalyzerError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Decode README content: base64 wrapped at 60 columns, UTF-8 inside.
pub(crate) fn decode_readme(content: &str) -> Result<String> {
    let cleaned: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(cleaned)
        .map_err(|e| AnalyzerError::Readme(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AnalyzerError::Readme(e.to_string()))
}

/// Parse a language map, keeping the order languages appear in the body.
pub(crate) fn parse_languages(body: &str) -> Result<LanguageShareMap> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(body)?;
    map.into_iter()
        .map(|(language, bytes)| match bytes.as_u64() {
            Some(count) => Ok((language, count)),
            None => Err(AnalyzerError::Json(<serde_json::Error as serde::de::Error>::custom(
                format!("byte count for {language} is not a non-negative integer"),
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_readme_with_line_breaks() {
        // "# Hello\n\nWorld" encoded and wrapped like the API does
        let content = "IyBIZWxs\nbwoKV29y\nbGQ=\n";
        assert_eq!(decode_readme(content).unwrap(), "# Hello\n\nWorld");
    }

    #[test]
    fn test_decode_readme_rejects_garbage() {
        assert!(matches!(decode_readme("!!!"), Err(AnalyzerError::Readme(_))));
        // valid base64, invalid UTF-8
        assert!(matches!(decode_readme("/w=="), Err(AnalyzerError::Readme(_))));
    }

    #[test]
    fn test_parse_languages_keeps_response_order() {
        let body = r#"{"Rust": 1200, "C": 50, "Assembly": 900}"#;
        let languages = parse_languages(body).unwrap();
        assert_eq!(
            languages,
            vec![
                ("Rust".to_string(), 1200),
                ("C".to_string(), 50),
                ("Assembly".to_string(), 900),
            ]
        );
    }

    #[test]
    fn test_parse_languages_rejects_negative_counts() {
        assert!(parse_languages(r#"{"Rust": -1}"#).is_err());
        assert!(parse_languages("[]").is_err());
    }

    #[test]
    fn test_api_error_extracts_message() {
        let err = api_error(StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#);
        match err {
            AnalyzerError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = api_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(matches!(err, AnalyzerError::Api { status: 502, ref message } if message.is_empty()));
    }

    #[test]
    fn test_snapshot_from_response() {
        let body = r#"{
            "name": "demo",
            "owner": {"login": "octo"},
            "description": null,
            "stargazers_count": 10,
            "forks_count": 2,
            "open_issues_count": 3,
            "watchers_count": 10,
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2024-05-06T07:08:09Z",
            "language": "Rust",
            "license": null,
            "languages_url": "https://api.github.com/repos/octo/demo/languages"
        }"#;
        let repo: RepoResponse = serde_json::from_str(body).unwrap();
        let snapshot = RepositorySnapshot::from(repo);
        assert_eq!(snapshot.name, "demo");
        assert_eq!(snapshot.owner_login, "octo");
        assert_eq!(snapshot.description, None);
        assert_eq!(snapshot.license_name, None);
        assert_eq!(snapshot.language.as_deref(), Some("Rust"));
        assert_eq!(snapshot.stars, 10);
    }

    #[test]
    fn test_repo_url() {
        let client = GitHubClient::new("http://localhost:1234/");
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert_eq!(
            client.repo_url(&RepoId::new("a", "b")),
            "http://localhost:1234/repos/a/b"
        );
    }
}
