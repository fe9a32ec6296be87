//! URL handling module
//!
//! This module turns the links found on catechism pages into absolute page
//! URLs and provides the path cleaning used while doing so.

mod normalize;
mod resolver;

// Re-export main functions
pub use normalize::{clean_path, is_under};
pub use resolver::UrlResolver;
