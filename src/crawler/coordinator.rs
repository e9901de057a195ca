//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the generation-advance state machine and the loop
//! that drives it, including:
//! - Promoting the queued frontier into the working set of a generation
//! - Canonicalizing, fetching, and parsing each working URL
//! - Absorbing per-URL failures (backoff on transport errors, skip otherwise)
//! - Stopping at the cycle limit or when the frontier runs dry
//! - Saving what was gathered when the crawl is interrupted

use crate::config::{CrawlConfig, OutputTargets};
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::parser::HtmlParser;
use crate::output::{persist_all, CrawlSummary, SinkOutcome};
use crate::state::{CrawlRecord, Frontier};
use crate::storage::save_records;
use crate::text::normalize_paragraphs;
use crate::url::LinkCanonicalizer;
use crate::{ConfigError, PageError, ScrapeError};
use std::future::Future;
use std::ops::AddAssign;
use std::time::Instant;

/// Counters for a single generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Stale in-flight URLs moved to visited before promotion
    pub flushed: usize,

    /// URLs promoted into the working set
    pub promoted: usize,

    /// Pages that produced a record
    pub recorded: usize,

    /// Links the canonicalizer refused
    pub rejected: usize,

    /// Transport failures that triggered a backoff
    pub transient_failures: usize,

    /// Other per-URL failures (HTTP status, parse errors)
    pub failures: usize,

    /// Links newly added to the queue
    pub discovered: usize,
}

impl GenerationReport {
    /// Returns true if the generation had nothing to work on
    pub fn is_idle(&self) -> bool {
        self.promoted == 0
    }
}

impl AddAssign for GenerationReport {
    fn add_assign(&mut self, other: Self) {
        self.flushed += other.flushed;
        self.promoted += other.promoted;
        self.recorded += other.recorded;
        self.rejected += other.rejected;
        self.transient_failures += other.transient_failures;
        self.failures += other.failures;
        self.discovered += other.discovered;
    }
}

/// Main crawler structure
///
/// Owns the frontier and the accumulated records for one crawl run. The
/// fetcher is generic so tests can serve pages without a network.
pub struct Crawler<F = HttpFetcher> {
    config: CrawlConfig,
    canonicalizer: LinkCanonicalizer,
    parser: HtmlParser,
    fetcher: F,
    frontier: Frontier,
    records: Vec<CrawlRecord>,
    generations: u32,
    totals: GenerationReport,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(ScrapeError)` - The HTTP client or link patterns could not be built
    pub fn new(config: CrawlConfig) -> Result<Self, ScrapeError> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetch> Crawler<F> {
    /// Creates a crawler with a custom fetcher
    pub fn with_fetcher(config: CrawlConfig, fetcher: F) -> Result<Self, ScrapeError> {
        let canonicalizer = LinkCanonicalizer::new(&config).map_err(|e| {
            ConfigError::Validation(format!(
                "source_name '{}' cannot be used as a link pattern: {}",
                config.source_name, e
            ))
        })?;
        let parser = HtmlParser::new()?;
        let frontier = Frontier::new(config.start_url.clone());

        Ok(Self {
            config,
            canonicalizer,
            parser,
            fetcher,
            frontier,
            records: Vec::new(),
            generations: 0,
            totals: GenerationReport::default(),
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Records gathered so far, in the order pages were processed
    pub fn records(&self) -> &[CrawlRecord] {
        &self.records
    }

    /// Number of generations run so far
    pub fn generations(&self) -> u32 {
        self.generations
    }

    /// Runs one generation: flush, promote, process, demote
    ///
    /// Every working URL ends the generation in `visited`, whatever happened
    /// to it, so the frontier is consistent between generations. Per-URL
    /// failures are counted in the report and never abort the generation.
    pub async fn advance_generation(&mut self) -> GenerationReport {
        let mut report = GenerationReport {
            flushed: self.frontier.flush_in_flight(),
            ..GenerationReport::default()
        };
        if report.flushed > 0 {
            tracing::debug!("Flushed {} stale in-flight URLs", report.flushed);
        }

        let working = self.frontier.promote();
        report.promoted = working.len();

        for url in working {
            let Some(target) = self.canonicalizer.canonicalize(&url) else {
                tracing::debug!("Rejected link: {:?}", url);
                self.frontier.retire(&url);
                report.rejected += 1;
                continue;
            };

            match self.visit(&url, &target).await {
                Ok(discovered) => {
                    report.recorded += 1;
                    report.discovered += discovered;
                }
                Err(PageError::Fetch(e)) if e.is_transient() => {
                    tracing::warn!("{}; sleeping {:?}", e, self.config.backoff);
                    report.transient_failures += 1;
                    tokio::time::sleep(self.config.backoff).await;
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", target, e);
                    report.failures += 1;
                }
            }
        }

        self.frontier.demote();
        self.generations += 1;
        self.totals += report;

        tracing::debug!(
            "Generation {} done: {} recorded, {} rejected, {} failed, {} newly queued",
            self.generations,
            report.recorded,
            report.rejected,
            report.transient_failures + report.failures,
            report.discovered
        );

        report
    }

    /// Fetches and parses one page, queues its links, and records its text
    ///
    /// # Returns
    ///
    /// The number of links newly queued from this page
    async fn visit(&mut self, url: &str, target: &str) -> Result<usize, PageError> {
        tracing::debug!("Fetching {}", target);
        let body = self.fetcher.fetch(target).await?;
        let page = self.parser.parse(&body)?;

        let discovered = page
            .links
            .iter()
            .filter(|link| self.frontier.discover(link))
            .count();

        let text = normalize_paragraphs(&page.paragraphs);
        let record = CrawlRecord::new(self.config.source_name.as_str(), url, text);
        self.records.push(record);

        Ok(discovered)
    }

    /// Runs generations until the cycle limit or until nothing is queued
    pub async fn run(&mut self) -> CrawlSummary {
        tracing::info!(
            "Starting scrape of {} from {} (up to {} generations)",
            self.config.source_name,
            self.config.start_url,
            self.config.cycle_limit
        );

        let start_time = Instant::now();
        let mut frontier_exhausted = false;

        while self.generations < self.config.cycle_limit {
            tracing::info!(
                "{:3} | Parsing {:4} links",
                self.generations,
                self.frontier.queued_len()
            );

            self.advance_generation().await;

            if self.frontier.queued_len() == 0 {
                tracing::info!(
                    "Ran out of links to parse at generation {}",
                    self.generations - 1
                );
                frontier_exhausted = true;
                break;
            }
        }

        let summary = self.summary(frontier_exhausted, start_time);
        tracing::info!(
            "Ending scrape. Successfully added {} pages of {}",
            summary.records,
            summary.visited
        );
        summary
    }

    fn summary(&self, frontier_exhausted: bool, start_time: Instant) -> CrawlSummary {
        CrawlSummary {
            source: self.config.source_name.clone(),
            generations: self.generations,
            records: self.records.len(),
            visited: self.frontier.visited_len(),
            queued: self.frontier.queued_len(),
            rejected: self.totals.rejected,
            transient_failures: self.totals.transient_failures,
            failures: self.totals.failures,
            frontier_exhausted,
            elapsed: start_time.elapsed(),
        }
    }
}

/// Runs a crawl to completion or until `shutdown` resolves, then persists
///
/// On normal completion every configured sink is written (or the records are
/// dumped to stdout when none is). When `shutdown` wins, the records gathered
/// so far are saved to the SQLite sink if one is configured, and
/// [`ScrapeError::Interrupted`] is returned.
///
/// # Example
///
/// ```no_run
/// use sitescrape::config::{CrawlConfig, OutputTargets};
/// use sitescrape::crawler::{scrape_until, Crawler};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CrawlConfig::new("vox", "https://www.vox.com/", None, None)?;
/// let mut crawler = Crawler::new(config)?;
/// let (summary, _outcomes) =
///     scrape_until(&mut crawler, &OutputTargets::default(), tokio::signal::ctrl_c()).await?;
/// println!("{} records", summary.records);
/// # Ok(())
/// # }
/// ```
pub async fn scrape_until<F, S, T>(
    crawler: &mut Crawler<F>,
    targets: &OutputTargets,
    shutdown: S,
) -> Result<(CrawlSummary, Vec<SinkOutcome>), ScrapeError>
where
    F: Fetch,
    S: Future<Output = T>,
{
    let completed = tokio::select! {
        biased;
        _ = shutdown => None,
        summary = crawler.run() => Some(summary),
    };

    match completed {
        Some(summary) => {
            let outcomes = persist_all(crawler.records(), targets);
            Ok((summary, outcomes))
        }
        None => {
            tracing::warn!(
                "Interrupted with {} records collected; trying to save before quitting",
                crawler.records().len()
            );
            if let Some(db) = &targets.db {
                match save_records(db, crawler.records()) {
                    Ok(inserted) => {
                        tracing::info!("Saved {} new rows to {}", inserted, db.display())
                    }
                    Err(e) => tracing::error!("Could not save to {}: {}", db.display(), e),
                }
            }
            Err(ScrapeError::Interrupted)
        }
    }
}
