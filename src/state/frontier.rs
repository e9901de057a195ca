//! Frontier bookkeeping
//!
//! The frontier owns three disjoint URL sets. URLs move strictly forward
//! through them and are never dropped, only reclassified.

use crate::state::UrlState;
use std::collections::BTreeSet;

/// The queued, in-flight, and visited URL sets of one crawl
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queued: BTreeSet<String>,
    in_flight: BTreeSet<String>,
    visited: BTreeSet<String>,
}

impl Frontier {
    /// Creates a frontier with the seed URL queued
    pub fn new(seed: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.queued.insert(seed.into());
        frontier
    }

    /// Moves anything left in flight from an incomplete generation to visited
    ///
    /// # Returns
    ///
    /// The number of URLs moved
    pub fn flush_in_flight(&mut self) -> usize {
        let flushed = self.in_flight.len();
        self.visited.append(&mut self.in_flight);
        flushed
    }

    /// Moves every queued URL in flight and returns the working set
    ///
    /// An empty result means the frontier is exhausted.
    pub fn promote(&mut self) -> Vec<String> {
        self.in_flight.append(&mut self.queued);
        self.in_flight.iter().cloned().collect()
    }

    /// Queues a newly discovered raw link
    ///
    /// A link that is already visited or in flight is ignored, so a URL
    /// never re-enters the queue once it has been scheduled.
    ///
    /// # Returns
    ///
    /// `true` if the link was not known before and is now queued
    pub fn discover(&mut self, link: &str) -> bool {
        if self.visited.contains(link) || self.in_flight.contains(link) {
            return false;
        }
        self.queued.insert(link.to_string())
    }

    /// Retires an in-flight URL early, e.g. after it was rejected
    ///
    /// # Returns
    ///
    /// `true` if the URL was in flight
    pub fn retire(&mut self, url: &str) -> bool {
        match self.in_flight.take(url) {
            Some(url) => {
                self.visited.insert(url);
                true
            }
            None => false,
        }
    }

    /// Moves every remaining in-flight URL to visited
    ///
    /// # Returns
    ///
    /// The number of URLs moved
    pub fn demote(&mut self) -> usize {
        self.flush_in_flight()
    }

    /// Returns the state of a URL, or `None` if it has never been seen
    pub fn state_of(&self, url: &str) -> Option<UrlState> {
        if self.queued.contains(url) {
            Some(UrlState::Queued)
        } else if self.in_flight.contains(url) {
            Some(UrlState::InFlight)
        } else if self.visited.contains(url) {
            Some(UrlState::Visited)
        } else {
            None
        }
    }

    pub fn visited(&self) -> impl Iterator<Item = &str> {
        self.visited.iter().map(String::as_str)
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Total number of distinct URLs the frontier knows about
    pub fn total_known(&self) -> usize {
        self.queued.len() + self.in_flight.len() + self.visited.len()
    }

    /// Returns true if no URL belongs to more than one set
    pub fn is_disjoint(&self) -> bool {
        self.queued.is_disjoint(&self.in_flight)
            && self.queued.is_disjoint(&self.visited)
            && self.in_flight.is_disjoint(&self.visited)
    }
}
