//! Configuration module for the catechism reader
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every setting has a default, so running without a
//! file reads the official English catechism into `./cache`.
//!
//! # Example
//!
//! ```no_run
//! use catechism::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("catechism.toml")).unwrap();
//! println!("Reading from {}", config.source.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CacheConfig, Config, HttpConfig, PositionConfig, SourceConfig};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
