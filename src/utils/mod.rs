pub mod format;
pub mod url;

pub use url::parse_repo_url;
