//! Output module for printing paragraphs and crawl reports
//!
//! This module handles:
//! - Writing paragraphs one per line for the command surface
//! - Recording and printing crawl statistics

pub mod stats;

pub use stats::{print_statistics, write_statistics, CrawlStats};

use crate::catechism::{CatechismIndex, Paragraph};
use std::io::{self, Write};

/// Writes every paragraph in ascending number order, one per line
pub fn write_index<W: Write>(out: &mut W, index: &CatechismIndex) -> io::Result<()> {
    for paragraph in index.paragraphs() {
        writeln!(out, "{}", paragraph.one_line())?;
    }
    Ok(())
}

/// Writes a single paragraph on one line
///
/// A missing paragraph is written as an empty line.
pub fn write_paragraph<W: Write>(out: &mut W, paragraph: Option<&Paragraph>) -> io::Result<()> {
    match paragraph {
        Some(paragraph) => writeln!(out, "{}", paragraph.one_line()),
        None => writeln!(out),
    }
}
