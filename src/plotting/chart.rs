//! Chart descriptions built from shaped repository data.
//!
//! These are plain values; [`super::draw`] turns them into images.

use plotters::style::RGBColor;

use super::styles::{pie_colors, repo_color};
use crate::analysis::{ShapedView, Timeframe};
use crate::types::LanguageShare;

/// One line on the commit activity chart.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSeriesSpec {
    pub name: String,
    pub color: RGBColor,
    /// (week index, commits)
    pub points: Vec<(f64, f64)>,
}

/// Weekly commit activity, one line per repository.
#[derive(Clone, Debug, PartialEq)]
pub struct CommitChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<LineSeriesSpec>,
}

impl CommitChart {
    /// Repositories without commit data get no line.
    pub fn new(views: &[(&str, &ShapedView<'_>)], timeframe: Timeframe) -> Self {
        let series = views
            .iter()
            .enumerate()
            .filter(|(_, (_, view))| !view.commits.is_empty())
            .map(|(idx, (name, view))| LineSeriesSpec {
                name: name.to_string(),
                color: repo_color(idx),
                points: view
                    .commits
                    .iter()
                    .enumerate()
                    .map(|(week, total)| (week as f64, *total as f64))
                    .collect(),
            })
            .collect();

        Self {
            title: format!("Weekly Commit Activity ({})", timeframe.label()),
            x_label: "Weeks Ago".to_string(),
            y_label: "Number of Commits".to_string(),
            series,
        }
    }

    /// Longest series length.
    pub fn x_len(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).max().unwrap_or(0)
    }

    pub fn y_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, y)| *y))
            .fold(0.0, f64::max)
    }
}

/// One pie on the language chart.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSpec {
    pub name: String,
    pub slices: Vec<LanguageShare>,
    pub colors: Vec<RGBColor>,
}

impl PieSpec {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Language distribution, one pie per repository side by side.
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageChart {
    pub title: String,
    pub pies: Vec<PieSpec>,
}

impl LanguageChart {
    pub fn new(views: &[(&str, &ShapedView<'_>)]) -> Self {
        let pies = views
            .iter()
            .map(|(name, view)| PieSpec {
                name: name.to_string(),
                slices: view.languages.clone(),
                colors: pie_colors(view.languages.len()),
            })
            .collect();

        Self {
            title: "Language Distribution".to_string(),
            pies,
        }
    }
}

/// One repository's bars on the contributor chart.
#[derive(Clone, Debug, PartialEq)]
pub struct BarGroupSpec {
    pub name: String,
    pub color: RGBColor,
    /// (login, contributions)
    pub bars: Vec<(String, u64)>,
}

/// Top contributors as grouped bars.
#[derive(Clone, Debug, PartialEq)]
pub struct ContributorChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub groups: Vec<BarGroupSpec>,
}

impl ContributorChart {
    /// Repositories whose filtered contributor list is empty get no bars.
    pub fn new(views: &[(&str, &ShapedView<'_>)], username_filter: Option<&str>) -> Self {
        let groups = views
            .iter()
            .enumerate()
            .filter(|(_, (_, view))| !view.contributors.is_empty())
            .map(|(idx, (name, view))| BarGroupSpec {
                name: name.to_string(),
                color: repo_color(idx),
                bars: view
                    .contributors
                    .iter()
                    .map(|c| (c.login.clone(), c.contributions))
                    .collect(),
            })
            .collect();

        let title = match username_filter.filter(|f| !f.is_empty()) {
            Some(filter) => format!("Top Contributors (Filtered by: {filter})"),
            None => "Top Contributors".to_string(),
        };

        Self {
            title,
            x_label: "Contributor".to_string(),
            y_label: "Number of Contributions".to_string(),
            groups,
        }
    }

    /// Distinct logins across all groups, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for (login, _) in self.groups.iter().flat_map(|g| g.bars.iter()) {
            if !categories.contains(login) {
                categories.push(login.clone());
            }
        }
        categories
    }

    pub fn y_max(&self) -> u64 {
        self.groups
            .iter()
            .flat_map(|g| g.bars.iter().map(|(_, count)| *count))
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
