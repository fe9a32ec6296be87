//! Catechism document model
//!
//! # Components
//!
//! - `Paragraph`: One numbered unit of the text
//! - `CatechismIndex`: Paragraphs by number, filled by the crawl
//! - `Outline`: Part/section/chapter/article nesting with parent navigation

mod index;
mod outline;
mod paragraph;

pub use index::CatechismIndex;
pub use outline::{Level, NodeId, Outline, OutlineNode};
pub use paragraph::Paragraph;
