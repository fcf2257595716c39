//! # Configuration
//!
//! Runtime settings read from the environment (and a `.env` file, loaded by
//! the binary), plus the per-request context handed to the data client.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AnalyzerError, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Application settings.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash
    pub api_url: String,
    /// Token picked up at startup, if any
    pub token: Option<String>,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    /// Where downloaded reports are written
    pub report_dir: PathBuf,
    /// Where rendered chart images are written
    pub plot_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            report_dir: default_report_dir(),
            plot_dir: env::temp_dir().join("repostats"),
        }
    }
}

impl Config {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("GITHUB_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let cache_ttl = match non_empty("REPOSTATS_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(parse_number("REPOSTATS_CACHE_TTL_SECS", &raw)?),
            None => defaults.cache_ttl,
        };

        let cache_capacity = match non_empty("REPOSTATS_CACHE_CAPACITY") {
            Some(raw) => {
                let capacity = parse_number("REPOSTATS_CACHE_CAPACITY", &raw)?;
                if capacity == 0 {
                    return Err(AnalyzerError::Config(
                        "REPOSTATS_CACHE_CAPACITY must be greater than zero".to_string(),
                    ));
                }
                capacity as usize
            }
            None => defaults.cache_capacity,
        };

        Ok(Self {
            api_url,
            token: non_empty("GITHUB_TOKEN"),
            cache_ttl,
            cache_capacity,
            report_dir: non_empty("REPOSTATS_REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.report_dir),
            plot_dir: non_empty("REPOSTATS_PLOT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.plot_dir),
        })
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| AnalyzerError::Config(format!("{key} must be a whole number, got '{raw}'")))
}

fn default_report_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Per-request settings threaded into every remote call.
///
/// The token lives here, owned by the session that supplied it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub token: Option<String>,
}

impl RequestContext {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// The session token if one was typed in, else the configured one.
    pub fn for_session(session_token: &str, config: &Config) -> Self {
        if session_token.trim().is_empty() {
            Self::new(config.token.clone())
        } else {
            Self::new(Some(session_token.trim().to_string()))
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}
