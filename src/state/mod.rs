//! State module for tracking crawl and reading progress
//!
//! # Components
//!
//! - `WalkState`: Tracks where the pagination walk is on the current page
//! - `ReadingPosition`: The persisted "current paragraph" behind `begin`/`next`

mod position;
mod walk_state;

// Re-export main types
pub use position::ReadingPosition;
pub use walk_state::WalkState;
