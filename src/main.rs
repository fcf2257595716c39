//! GitHub Repo Analyzer
//!
//! A GUI application for analyzing and comparing GitHub repositories.

use anyhow::Context as _;
use eframe::egui;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repostats::app::{App, AppWrapper};
use repostats::Config;

fn init_tracing() {
    let default_level = if cfg!(feature = "dev") { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    tracing::info!(api = %config.api_url, token = config.token.is_some(), "starting analyzer");

    let rt = Runtime::new().context("failed to start tokio runtime")?;
    rt.block_on(async {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 800.0])
                .with_min_inner_size([800.0, 600.0])
                .with_title("GitHub Repo Analyzer"),
            ..Default::default()
        };

        eframe::run_native(
            "GitHub Repo Analyzer",
            options,
            Box::new(move |cc| {
                cc.egui_ctx.set_fonts(egui::FontDefinitions::default());

                let app: Arc<Mutex<App>> = Arc::new(Mutex::new(App::with_config(config)));
                Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
            }),
        )
        .map_err(|e| anyhow::anyhow!("Error running application: {e}"))
    })
}
