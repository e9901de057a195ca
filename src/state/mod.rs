//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `UrlState`: Where a URL sits in the frontier (queued, in flight, visited)
//! - `Frontier`: The three disjoint URL sets of a crawl
//! - `CrawlRecord`: One visited page's extracted output

mod frontier;
mod record;
mod url_state;

// Re-export main types
pub use frontier::Frontier;
pub use record::{CrawlRecord, RECORD_FIELDS, TIMESTAMP_FORMAT};
pub use url_state::UrlState;
