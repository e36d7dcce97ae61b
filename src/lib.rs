//! Diary-Walker: a backward archiver for web diary posts
//!
//! This crate walks a single author's diary from the newest post back to the
//! oldest, following each page's "previous entry" link. Every post's title,
//! date, body text and images are saved into a directory of their own.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Diary-Walker operations
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Page fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Image download failed: {0}")]
    ImageFetch(#[source] FetchError),

    #[error("Output error: {0}")]
    Output(#[source] output::OutputError),

    #[error("Predecessor chain loops back to an already visited post: {url}")]
    CycleDetected { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl From<output::OutputError> for DiaryError {
    fn from(err: output::OutputError) -> Self {
        match err {
            output::OutputError::ImageFetch(source) => Self::ImageFetch(source),
            other => Self::Output(other),
        }
    }
}

/// Errors raised while retrieving a page or an image
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The URL whose retrieval failed
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Transport { url, .. } => url,
        }
    }

    /// Returns true for failures worth retrying (transport errors, 429, 5xx)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Transport { .. } => true,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Diary-Walker operations
pub type Result<T> = std::result::Result<T, DiaryError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator, PostChain, PostRecord};
pub use output::{ArtifactWriter, CrawlSummary, PostSink};
pub use state::{AuthorIdentity, ChainPhase, TraversalState};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_missing_config_file_is_a_config_error() {
        let err: DiaryError = config::load_config(Path::new("/nonexistent/diary.toml"))
            .unwrap_err()
            .into();
        assert!(matches!(err, DiaryError::Config(ConfigError::Io(_))));
    }

    #[test]
    fn test_write_failure_is_an_output_error() {
        let err: DiaryError = output::OutputError::Io {
            path: PathBuf::from("/archive/blog.txt"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
        .into();
        assert!(matches!(err, DiaryError::Output(output::OutputError::Io { .. })));
    }

    #[test]
    fn test_image_failure_is_lifted() {
        let err: DiaryError = output::OutputError::ImageFetch(FetchError::Status {
            url: "https://diary.example.com/img/a.jpg".to_string(),
            status: 404,
        })
        .into();
        assert!(matches!(
            err,
            DiaryError::ImageFetch(FetchError::Status { status: 404, .. })
        ));
    }
}
