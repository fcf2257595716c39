use eframe::App as EApp;
use egui::TextureHandle;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::analysis::{fetch_pair, fetch_repo, shape, FetchCache, ShapedView, Timeframe, ViewOptions};
use crate::client::{GitHubClient, RepoSource};
use crate::config::{Config, RequestContext};
use crate::error::{AnalyzerError, Result};
use crate::plotting::{render_charts, ChartImages, CommitChart, ContributorChart, LanguageChart};
use crate::report::{generate_report_now, save_report};
use crate::types::{AnalysisMode, RepoData, RepoId};
use crate::utils::parse_repo_url;

/// Outcome of analyzing one repository slot; errors are kept as display text.
pub type SlotResult = std::result::Result<RepoData, String>;

/// Repositories that still have to be fetched for the current analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisJob {
    /// (slot index, repository)
    pub targets: Vec<(usize, RepoId)>,
    pub ctx: RequestContext,
}

/// Textures for the rendered chart images.
#[derive(Clone, Default)]
pub struct ChartTextures {
    pub commits: Option<TextureHandle>,
    pub languages: Option<TextureHandle>,
    pub contributors: Option<TextureHandle>,
}

/// Main application state
pub struct App {
    pub config: Config,
    pub source: Arc<dyn RepoSource>,
    pub mode: AnalysisMode,
    /// Token typed into the sidebar; only ever passed through [`RequestContext`]
    pub token_input: String,
    pub repo_urls: [String; 2],
    pub results: [Option<SlotResult>; 2],
    pub view: ViewOptions,
    pub cache: FetchCache,
    pub is_analyzing: bool,
    pub update_needed: bool,
    pub chart_images: Option<ChartImages>,
    pub chart_textures: ChartTextures,
    pub info_message: Option<String>,
    pub error_message: Option<String>,
    /// Last saved report path (or failure) per slot
    pub report_status: [Option<String>; 2],
}

impl App {
    pub fn new(config: Config, source: Arc<dyn RepoSource>) -> Self {
        Self {
            cache: FetchCache::from_config(&config),
            config,
            source,
            mode: AnalysisMode::Single,
            token_input: String::new(),
            repo_urls: [String::new(), String::new()],
            results: [None, None],
            view: ViewOptions::default(),
            is_analyzing: false,
            update_needed: false,
            chart_images: None,
            chart_textures: ChartTextures::default(),
            info_message: None,
            error_message: None,
            report_status: [None, None],
        }
    }

    pub fn with_config(config: Config) -> Self {
        let source = Arc::new(GitHubClient::from_config(&config));
        Self::new(config, source)
    }

    /// Slots used by the current mode.
    pub fn active_slots(&self) -> usize {
        match self.mode {
            AnalysisMode::Single => 1,
            AnalysisMode::Compare => 2,
        }
    }

    pub fn request_context(&self) -> RequestContext {
        RequestContext::for_session(&self.token_input, &self.config)
    }

    pub fn has_token(&self) -> bool {
        self.request_context().has_token()
    }

    pub fn set_mode(&mut self, mode: AnalysisMode) {
        if self.mode != mode {
            self.mode = mode;
            self.results = [None, None];
            self.report_status = [None, None];
            self.clear_charts();
        }
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        if self.view.timeframe != timeframe {
            self.view.timeframe = timeframe;
            self.update_needed = true;
        }
    }

    pub fn set_username_filter(&mut self, filter: &str) {
        if self.view.username_filter != filter {
            self.view.username_filter = filter.to_string();
            self.update_needed = true;
        }
    }

    /// Resolve the URLs for the current mode into a fetch job.
    ///
    /// Cached repositories are filled in directly unless `refresh` is set.
    /// Returns `None` when there is nothing to fetch.
    pub fn prepare_analysis(&mut self, refresh: bool) -> Option<AnalysisJob> {
        self.info_message = None;
        self.error_message = None;
        self.report_status = [None, None];
        self.clear_charts();

        let slots = self.active_slots();
        if self.repo_urls[..slots].iter().any(|url| url.trim().is_empty()) {
            self.info_message = Some(match self.mode {
                AnalysisMode::Single => "Enter a GitHub repository URL to analyze its metrics.".to_string(),
                AnalysisMode::Compare => "Please enter both repository URLs for comparison.".to_string(),
            });
            self.results = [None, None];
            return None;
        }

        let mut targets = Vec::new();
        for slot in 0..slots {
            match parse_repo_url(&self.repo_urls[slot]) {
                Ok(id) => {
                    if refresh {
                        self.cache.invalidate(&id);
                    }
                    match self.cache.get(&id) {
                        Some(data) => self.results[slot] = Some(Ok(data)),
                        None => {
                            self.results[slot] = None;
                            targets.push((slot, id));
                        }
                    }
                }
                Err(e) => self.results[slot] = Some(Err(e.user_message())),
            }
        }
        self.update_needed = true;

        if targets.is_empty() {
            return None;
        }
        Some(AnalysisJob {
            targets,
            ctx: self.request_context(),
        })
    }

    /// Store fetched repositories in their slots and in the cache.
    pub fn apply_results(&mut self, results: Vec<(usize, RepoId, Result<RepoData>)>) {
        for (slot, id, result) in results {
            let Some(target) = self.results.get_mut(slot) else {
                continue;
            };
            *target = Some(match result {
                Ok(data) => {
                    self.cache.store(id, data.clone());
                    Ok(data)
                }
                Err(e) => Err(e.user_message()),
            });
        }
        self.is_analyzing = false;
        self.update_needed = true;
    }

    /// Successfully fetched repositories for the current mode.
    ///
    /// In comparison mode both must have succeeded.
    pub fn loaded_repos(&self) -> Vec<&RepoData> {
        let loaded: Vec<&RepoData> = self.results[..self.active_slots()]
            .iter()
            .filter_map(|r| r.as_ref().and_then(|r| r.as_ref().ok()))
            .collect();
        if loaded.len() == self.active_slots() {
            loaded
        } else {
            Vec::new()
        }
    }

    pub fn shaped_views(&self) -> Vec<(&str, ShapedView<'_>)> {
        self.loaded_repos()
            .into_iter()
            .map(|data| (data.snapshot.name.as_str(), shape(data, &self.view)))
            .collect()
    }

    /// Chart descriptions for the current data and view, if anything is loaded.
    pub fn build_charts(&self) -> Option<(CommitChart, LanguageChart, ContributorChart)> {
        let shaped = self.shaped_views();
        if shaped.is_empty() {
            return None;
        }
        let views: Vec<(&str, &ShapedView<'_>)> = shaped.iter().map(|(name, view)| (*name, view)).collect();
        Some((
            CommitChart::new(&views, self.view.timeframe),
            LanguageChart::new(&views),
            ContributorChart::new(&views, self.view.filter()),
        ))
    }

    /// Re-render chart images from cached data; never refetches.
    pub fn refresh_charts(&mut self) -> Result<()> {
        self.update_needed = false;
        match self.build_charts() {
            Some((commits, languages, contributors)) => {
                let images = render_charts(&commits, &languages, &contributors, &self.config.plot_dir)?;
                self.chart_images = Some(images);
            }
            None => self.clear_charts(),
        }
        Ok(())
    }

    fn clear_charts(&mut self) {
        self.chart_images = None;
        self.chart_textures = ChartTextures::default();
    }

    /// Generate and save the report for a slot into the report directory.
    pub fn download_report(&mut self, slot: usize) -> Result<PathBuf> {
        let data = match self.results.get(slot) {
            Some(Some(Ok(data))) => data,
            _ => return Err(AnalyzerError::NotLoaded),
        };
        let report = generate_report_now(&data.snapshot, &data.commits, &data.contributors)?;
        let path = save_report(&self.config.report_dir, &data.snapshot.name, &report)?;
        self.report_status[slot] = Some(format!("Saved to {}", path.display()));
        Ok(path)
    }
}

/// Fetch a job's repositories; two targets are fetched concurrently.
pub async fn run_job(source: &dyn RepoSource, job: AnalysisJob) -> Vec<(usize, RepoId, Result<RepoData>)> {
    let AnalysisJob { mut targets, ctx } = job;
    match targets.len() {
        2 => {
            let (second_slot, second) = targets.remove(1);
            let (first_slot, first) = targets.remove(0);
            let (a, b) = fetch_pair(source, &ctx, &first, &second).await;
            vec![(first_slot, first, a), (second_slot, second, b)]
        }
        _ => {
            let mut results = Vec::with_capacity(targets.len());
            for (slot, id) in targets {
                let result = fetch_repo(source, &ctx, &id).await;
                results.push((slot, id, result));
            }
            results
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx, Arc::clone(&self.app));
        } else {
            tracing::error!("Failed to acquire app lock in update");
        }
    }
}
