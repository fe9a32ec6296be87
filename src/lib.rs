//! Catechism: a cached reader for the paginated Catechism of the Catholic Church
//!
//! This crate walks the linear "Next" chain of the published catechism pages,
//! extracts numbered paragraphs into an index, and keeps every fetched page in a
//! local cache so that repeated runs never touch the network again.

pub mod cache;
pub mod catechism;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for catechism operations
#[derive(Debug, Error)]
pub enum CatechismError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Malformed URL: {0}")]
    MalformedUrl(#[from] UrlError),

    #[error("Fetch failed for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Cache I/O error on {path}: {source}")]
    CacheIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cached response {key}: {message}")]
    Parse { key: String, message: String },

    #[error("Invalid walk transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Outline error: {0}")]
    Outline(String),

    #[error("Reading position error: {0}")]
    Position(#[from] PositionError),
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

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid base URL: {0}")]
    InvalidBase(String),

    #[error("Cannot join {reference} onto {base}: {message}")]
    Join {
        base: String,
        reference: String,
        message: String,
    },
}

/// Reading position errors
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("Cannot determine home directory")]
    NoHome,

    #[error("Position file I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse position file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode position: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Result type alias for catechism operations
pub type Result<T> = std::result::Result<T, CatechismError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use cache::{cache_key, CacheStore, WireResponse};
pub use catechism::{CatechismIndex, Paragraph};
pub use config::Config;
pub use crawler::{crawl, CrawlReport, PaginationWalker};
pub use state::{ReadingPosition, WalkState};
pub use crate::url::UrlResolver;
