//! Page cache module
//!
//! This module keeps every fetched catechism page on disk:
//! - Deriving filesystem-safe cache keys from page URLs
//! - Encoding complete HTTP responses to and from their wire form
//! - Serving pages from disk and fetching only on a miss

mod key;
mod store;
mod wire;

pub use key::{cache_key, MAX_KEY_LEN};
pub use store::CacheStore;
pub use wire::WireResponse;
