//! # GitHub Repository Analyzer
//!
//! `repostats` is a dashboard for inspecting public GitHub repositories.
//! It fetches repository metadata, weekly commit activity, contributors,
//! language statistics and the README through the GitHub REST API, and
//! renders them as charts, either for one repository or two side by side.
//!
//! ## Features
//!
//! - Repository metrics and details
//! - Weekly commit activity with selectable timeframes
//! - Language distribution as percentages
//! - Top contributors with username filtering
//! - Side-by-side comparison of two repositories, fetched concurrently
//! - Downloadable plain-text analysis reports
//! - Short-lived caching of fetched data
//!
//! ## Example
//!
//! ```no_run
//! use repostats::{Config, RepoStatsApp};
//! use std::sync::{Arc, Mutex};
//! use eframe::NativeOptions;
//!
//! let config = Config::from_env().unwrap();
//! let app = Arc::new(Mutex::new(RepoStatsApp::with_config(config)));
//! let app_wrapper = repostats::app::AppWrapper { app };
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let _guard = rt.enter();
//! eframe::run_native(
//!     "GitHub Repo Analyzer",
//!     NativeOptions::default(),
//!     Box::new(|_cc| Ok(Box::new(app_wrapper))),
//! ).unwrap();
//! ```

pub mod analysis;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod plotting;
pub mod report;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::App as RepoStatsApp;
pub use config::{Config, RequestContext};
pub use error::{AnalyzerError, Result};
pub use types::{RepoData, RepoId};
