//! Rendering of chart descriptions into PNG files with plotters.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::chart::{CommitChart, ContributorChart, LanguageChart, PieSpec};
use super::styles::{ChartStyle, ChartTheme};
use crate::error::{AnalyzerError, Result};
use crate::utils::format::format_count;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn plot_err<E: std::fmt::Display>(e: E) -> AnalyzerError {
    AnalyzerError::Plot(e.to_string())
}

fn font<'a>(size: u32, theme: &ChartTheme) -> TextStyle<'a> {
    ("sans-serif", size).into_font().color(&theme.text_color)
}

/// Paths of the images rendered for one dashboard state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartImages {
    pub commits: PathBuf,
    pub languages: PathBuf,
    pub contributors: PathBuf,
}

impl ChartImages {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            commits: dir.join("commit_activity.png"),
            languages: dir.join("language_distribution.png"),
            contributors: dir.join("top_contributors.png"),
        }
    }
}

/// Render all three charts into `dir`, creating it if needed.
pub fn render_charts(
    commits: &CommitChart,
    languages: &LanguageChart,
    contributors: &ContributorChart,
    dir: &Path,
) -> Result<ChartImages> {
    fs::create_dir_all(dir)?;
    let images = ChartImages::in_dir(dir);
    render_commit_chart(commits, &images.commits)?;
    render_language_chart(languages, &images.languages)?;
    render_contributor_chart(contributors, &images.contributors)?;
    Ok(images)
}

/// Line chart of weekly commits.
pub fn render_commit_chart(chart: &CommitChart, path: &Path) -> Result<()> {
    let style = ChartStyle::default();
    let theme = ChartTheme::default();
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&theme.background_color).map_err(plot_err)?;
    draw_commit_chart(chart, &root, &style, &theme)?;
    root.present().map_err(plot_err)?;
    Ok(())
}

fn draw_commit_chart(chart: &CommitChart, root: &Area<'_>, style: &ChartStyle, theme: &ChartTheme) -> Result<()> {
    let x_max = (chart.x_len().max(2) - 1) as f64;
    let y_max = (chart.y_max() * 1.1).max(1.0);

    let mut chart_builder = ChartBuilder::on(root)
        .caption(&chart.title, font(style.caption_size, theme))
        .margin(style.margin)
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size + 10)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(plot_err)?;

    chart_builder
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .label_style(font(style.font_size, theme))
        .axis_desc_style(font(style.font_size, theme))
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format_count(*y))
        .draw()
        .map_err(plot_err)?;

    if chart.series.is_empty() {
        root.draw_text(
            "No commit data",
            &font(style.font_size, theme).pos(Pos::new(HPos::Center, VPos::Center)),
            (style.width as i32 / 2, style.height as i32 / 2),
        )
        .map_err(plot_err)?;
        return Ok(());
    }

    for series in &chart.series {
        let color = series.color;
        chart_builder
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(style.line_width),
            ))
            .map_err(plot_err)?
            .label(series.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart_builder
        .configure_series_labels()
        .background_style(theme.background_color)
        .border_style(theme.axis_color)
        .label_font(font(style.font_size, theme))
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

/// Pie per repository, side by side.
pub fn render_language_chart(chart: &LanguageChart, path: &Path) -> Result<()> {
    let style = ChartStyle::default();
    let theme = ChartTheme::default();
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&theme.background_color).map_err(plot_err)?;

    let body = root
        .titled(&chart.title, font(style.caption_size, &theme))
        .map_err(plot_err)?;
    let panels = body.split_evenly((1, chart.pies.len().max(1)));
    for (pie, panel) in chart.pies.iter().zip(panels.iter()) {
        draw_pie(pie, panel, &style, &theme)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

fn draw_pie(spec: &PieSpec, panel: &Area<'_>, style: &ChartStyle, theme: &ChartTheme) -> Result<()> {
    let panel = panel
        .titled(&spec.name, font(style.font_size + 3, theme))
        .map_err(plot_err)?;
    let (width, height) = panel.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);

    if spec.is_empty() {
        panel
            .draw_text(
                "No language data",
                &font(style.font_size, theme).pos(Pos::new(HPos::Center, VPos::Center)),
                center,
            )
            .map_err(plot_err)?;
        return Ok(());
    }

    let radius = f64::from(width.min(height)) * 0.32;
    let sizes: Vec<f64> = spec.slices.iter().map(|s| s.percent).collect();
    let labels: Vec<String> = spec.slices.iter().map(|s| s.language.clone()).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &spec.colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(font(style.font_size, theme));
    pie.percentages(("sans-serif", style.font_size - 2).into_font().color(&BLACK));
    panel.draw(&pie).map_err(plot_err)?;
    Ok(())
}

/// Grouped bars of contributions per contributor.
pub fn render_contributor_chart(chart: &ContributorChart, path: &Path) -> Result<()> {
    let style = ChartStyle::default();
    let theme = ChartTheme::default();
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&theme.background_color).map_err(plot_err)?;
    draw_contributor_chart(chart, &root, &style, &theme)?;
    root.present().map_err(plot_err)?;
    Ok(())
}

fn draw_contributor_chart(
    chart: &ContributorChart,
    root: &Area<'_>,
    style: &ChartStyle,
    theme: &ChartTheme,
) -> Result<()> {
    let categories = chart.categories();
    let slots = categories.len().max(1);
    let y_max = (chart.y_max() as f64 * 1.1).max(1.0);

    let mut chart_builder = ChartBuilder::on(root)
        .caption(&chart.title, font(style.caption_size, theme))
        .margin(style.margin)
        .x_label_area_size(style.label_area_size + 50)
        .y_label_area_size(style.label_area_size + 10)
        .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), 0f64..y_max)
        .map_err(plot_err)?;

    // Only whole x positions carry a contributor name
    let names = categories.clone();
    let x_label_formatter = move |x: &f64| {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        names.get(rounded as usize).cloned().unwrap_or_default()
    };

    chart_builder
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(slots)
        .label_style(font(style.font_size, theme))
        .axis_desc_style(font(style.font_size, theme))
        .x_label_formatter(&x_label_formatter)
        .x_label_style(
            font(style.font_size - 2, theme)
                .transform(FontTransform::Rotate90)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        )
        .y_label_formatter(&|y| format_count(*y))
        .draw()
        .map_err(plot_err)?;

    if chart.is_empty() {
        root.draw_text(
            "No contributors to show",
            &font(style.font_size, theme).pos(Pos::new(HPos::Center, VPos::Center)),
            (style.width as i32 / 2, style.height as i32 / 2),
        )
        .map_err(plot_err)?;
        return Ok(());
    }

    let bar_width = 0.8 / chart.groups.len() as f64;
    for (group_idx, group) in chart.groups.iter().enumerate() {
        let color = group.color;
        let offset = group_idx as f64 * bar_width - 0.4;
        chart_builder
            .draw_series(group.bars.iter().filter_map(|(login, count)| {
                let slot = categories.iter().position(|c| c == login)?;
                let x0 = slot as f64 + offset;
                Some(Rectangle::new(
                    [(x0, 0.0), (x0 + bar_width, *count as f64)],
                    color.filled(),
                ))
            }))
            .map_err(plot_err)?
            .label(group.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
    }

    chart_builder
        .configure_series_labels()
        .background_style(theme.background_color)
        .border_style(theme.axis_color)
        .label_font(font(style.font_size, theme))
        .draw()
        .map_err(plot_err)?;

    Ok(())
}
