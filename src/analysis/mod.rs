mod cache;
pub mod contributors;
pub mod languages;
pub mod pipeline;
pub mod timeframe;

#[cfg(test)]
mod tests;

pub use cache::FetchCache;
pub use contributors::{filter_contributors, TOP_CONTRIBUTORS};
pub use languages::{compare_language_shares, language_shares};
pub use pipeline::{fetch_pair, fetch_repo, shape, ShapedView, ViewOptions};
pub use timeframe::{filter_commits_by_timeframe, Timeframe};
