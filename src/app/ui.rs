use egui::{Color32, ComboBox, Context, RichText, TextEdit, TextureHandle, Ui};
use image::ImageReader;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::state::{run_job, ChartTextures};
use super::App;
use crate::analysis::Timeframe;
use crate::types::{AnalysisMode, RepoData, RepositorySnapshot};
use crate::utils::format::{format_api_date, preview};

const README_PREVIEW_CHARS: usize = 1000;
const URL_HINT: &str = "https://github.com/owner/repo";
const ERROR_COLOR: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);
const WARNING_COLOR: Color32 = Color32::from_rgb(0xf1, 0xc4, 0x0f);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    draw_sidebar(app, ctx);

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("📊 GitHub Repo Analyzer");
            ui.separator();

            draw_inputs(app, ui, ctx, &app_arc);

            if let Some(info) = &app.info_message {
                ui.label(info);
            }
            if let Some(error) = &app.error_message {
                ui.colored_label(ERROR_COLOR, error);
            }

            ui.separator();
            match app.mode {
                AnalysisMode::Single => draw_single(app, ui),
                AnalysisMode::Compare => draw_comparison(app, ui),
            }
        });
    });

    // Update charts if needed
    if app.update_needed && !app.is_analyzing {
        match app.refresh_charts() {
            Ok(()) => load_chart_textures(app, ctx),
            Err(e) => {
                tracing::error!(error = %e, "chart rendering failed");
                app.error_message = Some(format!("Could not render charts: {e}"));
            }
        }
    }
}

fn draw_sidebar(app: &mut App, ctx: &Context) {
    egui::SidePanel::left("side_panel").show(ctx, |ui| {
        ui.heading("GitHub Token (Optional)");
        ui.label("Enter your GitHub Personal Access Token:");
        ui.add(
            TextEdit::singleline(&mut app.token_input)
                .password(true)
                .hint_text("ghp_xxxxxxxxxxxx"),
        )
        .on_hover_text("A token allows higher API rate limits. Leave empty to use default limits.");
        if !app.token_input.trim().is_empty() {
            ui.colored_label(SUCCESS_COLOR, "✅ Token set for this session");
        }

        ui.separator();

        ui.label("Select Analysis Mode:");
        let mut mode = app.mode;
        ui.radio_value(&mut mode, AnalysisMode::Single, AnalysisMode::Single.label());
        ui.radio_value(&mut mode, AnalysisMode::Compare, AnalysisMode::Compare.label());
        app.set_mode(mode);

        if !app.has_token() {
            ui.colored_label(
                WARNING_COLOR,
                "⚠️ No GitHub token found. Some API requests might be rate-limited.",
            );
        }

        ui.separator();
        ui.heading("How to Use");
        for step in how_to_use(app.mode) {
            ui.label(*step);
        }
    });
}

fn how_to_use(mode: AnalysisMode) -> &'static [&'static str] {
    match mode {
        AnalysisMode::Single => &[
            "1. Enter a GitHub repository URL",
            "2. View detailed metrics and visualizations",
            "3. Analyze commit patterns and language usage",
        ],
        AnalysisMode::Compare => &[
            "1. Enter two GitHub repository URLs",
            "2. Compare metrics side by side",
            "3. Analyze differences in:",
            "   - Commit patterns",
            "   - Language usage",
            "   - Contributor activity",
        ],
    }
}

fn draw_inputs(app: &mut App, ui: &mut Ui, ctx: &Context, app_arc: &Arc<Mutex<App>>) {
    let mut submitted = false;
    match app.mode {
        AnalysisMode::Single => {
            ui.label("Enter Repository URL:");
            submitted |= url_field(ui, &mut app.repo_urls[0]);
        }
        AnalysisMode::Compare => {
            let [first, second] = &mut app.repo_urls;
            ui.columns(2, |columns| {
                columns[0].label("Enter First Repository URL:");
                submitted |= url_field(&mut columns[0], first);
                columns[1].label("Enter Second Repository URL:");
                submitted |= url_field(&mut columns[1], second);
            });
        }
    }

    let mut refresh = false;
    ui.horizontal(|ui| {
        submitted |= ui.button("Analyze").clicked();
        refresh = ui
            .button("Refresh")
            .on_hover_text("Fetch again, ignoring recently fetched data")
            .clicked();
        if app.is_analyzing {
            ui.spinner();
            ui.label("Analyzing... Please wait.");
        }
    });

    if submitted || refresh {
        start_analysis(app, ctx, app_arc, refresh);
    }
}

/// Single-line URL input; true when the user pressed Enter in it.
fn url_field(ui: &mut Ui, url: &mut String) -> bool {
    let response = ui.add(TextEdit::singleline(url).hint_text(URL_HINT));
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

fn start_analysis(app: &mut App, ctx: &Context, app_arc: &Arc<Mutex<App>>, refresh: bool) {
    if app.is_analyzing {
        return;
    }
    let Some(job) = app.prepare_analysis(refresh) else {
        return;
    };
    app.is_analyzing = true;

    let source = Arc::clone(&app.source);
    let app_arc = Arc::clone(app_arc);
    let ctx = ctx.clone();
    tokio::spawn(async move {
        let results = run_job(source.as_ref(), job).await;
        match app_arc.lock() {
            Ok(mut app) => app.apply_results(results),
            Err(_) => tracing::error!("Failed to acquire app lock after analysis"),
        }
        ctx.request_repaint();
    });
}

fn draw_single(app: &mut App, ui: &mut Ui) {
    if app.results[0].is_none() {
        return;
    }
    ui.heading("Repository Metrics");
    draw_repo_section(app, ui, 0);

    if app.loaded_repos().is_empty() {
        return;
    }
    ui.heading("Analysis");
    draw_charts(app, ui, "Commit Activity", "Contributors");

    if let Some(Ok(data)) = &app.results[0] {
        draw_readme(ui, data);
    }
}

fn draw_comparison(app: &mut App, ui: &mut Ui) {
    if app.results.iter().all(Option::is_none) {
        return;
    }
    ui.heading("Repository Metrics");
    ui.columns(2, |columns| {
        for (slot, column) in columns.iter_mut().enumerate() {
            if let Some(Ok(data)) = &app.results[slot] {
                column.heading(format!("📊 {}", data.snapshot.name));
            }
            draw_repo_section(app, column, slot);
        }
    });

    if app.loaded_repos().is_empty() {
        return;
    }
    ui.heading("Comparative Analysis");
    draw_charts(app, ui, "Commit Activity Comparison", "Contributors Comparison");
}

fn draw_repo_section(app: &mut App, ui: &mut Ui, slot: usize) {
    let mut download = false;
    match &app.results[slot] {
        Some(Ok(data)) => {
            ui.columns(2, |columns| {
                draw_metrics(&mut columns[0], &data.snapshot);
                draw_details(&mut columns[1], &data.snapshot);
            });
            let label = match app.mode {
                AnalysisMode::Single => "📥 Download Analysis Report".to_string(),
                AnalysisMode::Compare => format!("📥 Download {} Report", data.snapshot.name),
            };
            download = ui.button(label).clicked();
        }
        Some(Err(message)) => {
            ui.colored_label(ERROR_COLOR, format!("Error: {message}"));
        }
        None => {}
    }

    if download {
        if let Err(e) = app.download_report(slot) {
            tracing::error!(error = %e, "report generation failed");
            app.report_status[slot] = Some(format!("Could not save report: {e}"));
        }
    }
    if let Some(status) = &app.report_status[slot] {
        ui.label(status);
    }
}

fn draw_metrics(ui: &mut Ui, snapshot: &RepositorySnapshot) {
    ui.columns(2, |columns| {
        metric(&mut columns[0], "Stars", snapshot.stars);
        metric(&mut columns[0], "Forks", snapshot.forks);
        metric(&mut columns[1], "Issues", snapshot.open_issues);
        metric(&mut columns[1], "Watchers", snapshot.watchers);
    });
}

fn metric(ui: &mut Ui, label: &str, value: u64) {
    ui.label(RichText::new(label).small());
    ui.label(RichText::new(value.to_string()).heading());
}

fn draw_details(ui: &mut Ui, snapshot: &RepositorySnapshot) {
    detail(ui, "Description", snapshot.description.as_deref().unwrap_or("No description"));
    detail(ui, "Language", snapshot.language.as_deref().unwrap_or("Not specified"));
    detail(ui, "Created", &display_date(&snapshot.created_at));
    detail(ui, "Owner", &snapshot.owner_login);
    detail(ui, "License", snapshot.license_name.as_deref().unwrap_or("Not specified"));
    detail(ui, "Last Updated", &display_date(&snapshot.updated_at));
}

fn detail(ui: &mut Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(format!("{label}:")).strong());
        ui.label(value);
    });
}

fn display_date(raw: &str) -> String {
    format_api_date(raw, "%B %d, %Y").unwrap_or_else(|e| {
        tracing::warn!(value = raw, error = %e, "unparseable timestamp");
        format!("Invalid date ({raw})")
    })
}

fn draw_charts(app: &mut App, ui: &mut Ui, commits_heading: &str, contributors_heading: &str) {
    ui.label(RichText::new(commits_heading).strong());
    let mut timeframe = app.view.timeframe;
    ComboBox::from_label("Select Timeframe:")
        .selected_text(timeframe.label())
        .show_ui(ui, |ui| {
            for option in Timeframe::ALL {
                ui.selectable_value(&mut timeframe, option, option.label());
            }
        });
    app.set_timeframe(timeframe);
    chart_image(ui, app.chart_textures.commits.as_ref());

    chart_image(ui, app.chart_textures.languages.as_ref());

    ui.label(RichText::new(contributors_heading).strong());
    let mut filter = app.view.username_filter.clone();
    ui.label("Filter contributors by username:");
    ui.add(TextEdit::singleline(&mut filter).hint_text("Enter username or leave empty for top 10"));
    app.set_username_filter(&filter);
    chart_image(ui, app.chart_textures.contributors.as_ref());
}

fn chart_image(ui: &mut Ui, texture: Option<&TextureHandle>) {
    if let Some(texture) = texture {
        let width = ui.available_width();
        ui.add(egui::Image::new(texture).max_width(width));
    }
}

fn draw_readme(ui: &mut Ui, data: &RepoData) {
    let Some(readme) = &data.readme else {
        return;
    };
    ui.separator();
    ui.heading("📖 README Preview");
    let (text, truncated) = preview(readme, README_PREVIEW_CHARS);
    ui.label(text);
    if truncated {
        egui::CollapsingHeader::new("Read more").show(ui, |ui| {
            ui.label(readme.as_str());
        });
    }
}

fn load_chart_textures(app: &mut App, ctx: &Context) {
    let Some(images) = app.chart_images.clone() else {
        app.chart_textures = ChartTextures::default();
        return;
    };
    app.chart_textures = ChartTextures {
        commits: load_texture(ctx, "commit_chart", &images.commits),
        languages: load_texture(ctx, "language_chart", &images.languages),
        contributors: load_texture(ctx, "contributor_chart", &images.contributors),
    };
}

fn load_texture(ctx: &Context, name: &str, path: &Path) -> Option<TextureHandle> {
    match ImageReader::open(path).and_then(|reader| {
        reader
            .decode()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }) {
        Ok(image) => {
            let size = [image.width() as usize, image.height() as usize];
            let pixels = image.to_rgba8();
            let pixels = pixels.as_flat_samples();
            Some(ctx.load_texture(
                name,
                egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
                egui::TextureOptions::LINEAR,
            ))
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to load chart image");
            None
        }
    }
}
