//! # Errors
//!
//! Failures surfaced while fetching, shaping and rendering repository data.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("README decode error: {0}")]
    Readme(String),
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Plotting error: {0}")]
    Plot(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("No repository data loaded")]
    NotLoaded,
}

impl AnalyzerError {
    /// Message shown to the user when a repository could not be analyzed.
    ///
    /// API failures show the platform's own message, everything else the
    /// full error text.
    pub fn user_message(&self) -> String {
        match self {
            AnalyzerError::Api { message, .. } if !message.is_empty() => message.clone(),
            AnalyzerError::Api { .. } => "Failed to fetch repository data".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_shows_platform_message() {
        let err = AnalyzerError::Api {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.user_message(), "Not Found");
        assert_eq!(err.to_string(), "GitHub API error (404): Not Found");
    }

    #[test]
    fn test_api_error_without_message_is_generic() {
        let err = AnalyzerError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "Failed to fetch repository data");
    }

    #[test]
    fn test_other_errors_use_display() {
        let err = AnalyzerError::InvalidUrl("nope".to_string());
        assert_eq!(err.user_message(), "Invalid repository URL: nope");
    }
}
