//! Crawl statistics
//!
//! Counters collected by the pagination walk and their `--stats` rendering.

use std::io::{self, Write};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages walked, including the first
    pub pages_visited: usize,

    /// Pages served from the cache directory
    pub cache_hits: usize,

    /// Pages that had to be fetched over the network
    pub network_fetches: usize,

    /// Paragraphs added to the index
    pub paragraphs_inserted: usize,

    /// Paragraph candidates dropped because the number was already indexed
    pub duplicates_skipped: usize,

    /// Wall-clock duration of the walk
    pub elapsed: Duration,
}

impl CrawlStats {
    /// Share of pages served from the cache, as a percentage
    pub fn hit_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.cache_hits as f64 / self.pages_visited as f64) * 100.0
    }
}

/// Writes statistics in a formatted manner
pub fn write_statistics<W: Write>(out: &mut W, stats: &CrawlStats) -> io::Result<()> {
    writeln!(out, "=== Crawl Statistics ===")?;
    writeln!(out)?;

    writeln!(out, "Pages:")?;
    writeln!(out, "  Visited: {}", stats.pages_visited)?;
    writeln!(
        out,
        "  From cache: {} ({:.1}%)",
        stats.cache_hits,
        stats.hit_rate()
    )?;
    writeln!(out, "  Fetched: {}", stats.network_fetches)?;
    writeln!(out)?;

    writeln!(out, "Paragraphs:")?;
    writeln!(out, "  Indexed: {}", stats.paragraphs_inserted)?;
    writeln!(out, "  Duplicates skipped: {}", stats.duplicates_skipped)?;
    writeln!(out)?;

    writeln!(out, "Elapsed: {:.2?}", stats.elapsed)
}

/// Prints statistics to stderr, keeping stdout for paragraph text
pub fn print_statistics(stats: &CrawlStats) {
    let stderr = io::stderr();
    if let Err(e) = write_statistics(&mut stderr.lock(), stats) {
        tracing::warn!("Failed to print statistics: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CrawlStats {
        CrawlStats {
            pages_visited: 4,
            cache_hits: 3,
            network_fetches: 1,
            paragraphs_inserted: 120,
            duplicates_skipped: 2,
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_hit_rate() {
        assert_eq!(sample().hit_rate(), 75.0);
        assert_eq!(CrawlStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_write_statistics() {
        let mut out = Vec::new();
        write_statistics(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("=== Crawl Statistics ==="));
        assert!(text.contains("  Visited: 4\n"));
        assert!(text.contains("  From cache: 3 (75.0%)\n"));
        assert!(text.contains("  Fetched: 1\n"));
        assert!(text.contains("  Indexed: 120\n"));
        assert!(text.contains("  Duplicates skipped: 2\n"));
        assert!(text.contains("Elapsed: 1.50s"));
    }
}
