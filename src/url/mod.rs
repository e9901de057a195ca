//! URL handling module for Sitescrape
//!
//! This module resolves raw link targets into in-scope absolute URLs and
//! derives the allowed domain from the seed URL when none is configured.

mod canonicalize;
mod domain;

// Re-export main types
pub use canonicalize::LinkCanonicalizer;
pub use domain::derive_allowed_domain;
