//! URL state definitions for tracking frontier progress
//!
//! A URL only ever moves forward: `Queued → InFlight → Visited`, or straight
//! from `Queued` to `Visited` when it is rejected before any fetch.

use std::fmt;

/// Represents where a URL currently sits in the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlState {
    /// Discovered, waiting for the next generation
    Queued,

    /// Scheduled for the current generation
    InFlight,

    /// Processed or permanently rejected
    Visited,
}

impl UrlState {
    /// Short lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InFlight => "in_flight",
            Self::Visited => "visited",
        }
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
