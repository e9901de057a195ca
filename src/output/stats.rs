//! End-of-run statistics
//!
//! This module holds the crawl summary the driver builds after its last
//! generation, and prints it for the binary.

use std::time::Duration;

/// Summary statistics for a crawl
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlSummary {
    /// Crawl identifier
    pub source: String,

    /// Generations actually run
    pub generations: u32,

    /// Records collected
    pub records: usize,

    /// URLs marked visited (fetched, failed, or rejected)
    pub visited: usize,

    /// URLs left queued when the run stopped
    pub queued: usize,

    /// Links the canonicalizer rejected
    pub rejected: usize,

    /// Fetches that failed with a transport error and triggered backoff
    pub transient_failures: usize,

    /// Fetch or parse failures that were skipped without backoff
    pub failures: usize,

    /// True when the run stopped because nothing was left to queue
    pub frontier_exhausted: bool,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl CrawlSummary {
    /// Percentage of visited URLs that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.visited == 0 {
            return 0.0;
        }
        (self.records as f64 / self.visited as f64) * 100.0
    }

    /// Total per-URL failures of either kind
    pub fn total_failures(&self) -> usize {
        self.transient_failures + self.failures
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Scrape Summary: {} ===\n", summary.source);

    println!("Overview:");
    println!("  Generations run: {}", summary.generations);
    println!("  Records collected: {}", summary.records);
    println!("  URLs visited: {}", summary.visited);
    println!("  URLs left queued: {}", summary.queued);
    println!("  Elapsed: {:.1}s", summary.elapsed.as_secs_f64());
    println!();

    if summary.rejected > 0 || summary.total_failures() > 0 {
        println!("Skipped:");
        println!("  Rejected links: {}", summary.rejected);
        println!("  Transport failures: {}", summary.transient_failures);
        println!("  Other failures: {}", summary.failures);
        println!();
    }

    if summary.frontier_exhausted {
        println!("Stopped early: frontier exhausted");
    }

    println!(
        "Success Rate: {:.1}% ({} / {} visited URLs recorded)",
        summary.success_rate(),
        summary.records,
        summary.visited
    );
}
