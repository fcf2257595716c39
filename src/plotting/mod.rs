pub mod chart;
mod draw;
pub mod styles;


pub use chart::{BarGroupSpec, CommitChart, ContributorChart, LanguageChart, LineSeriesSpec, PieSpec};
pub use draw::{
    render_charts, render_commit_chart, render_contributor_chart, render_language_chart, ChartImages,
};
