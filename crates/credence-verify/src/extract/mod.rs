//! Replaceable text extractors
//!
//! The scoring and orchestration logic upstream depends only on these
//! traits, so the heuristic pattern tables below can be swapped for a
//! different language or a real NLP pipeline without touching the
//! assessors.

pub mod citations;
pub mod claims;
pub mod dates;

pub use citations::UrlCitationExtractor;
pub use claims::{Claim, ClaimKind, PatternClaimExtractor, Statistic};
pub use dates::RegexDateExtractor;

use chrono::{DateTime, Utc};

/// Extracts a content publication date from free text or a metadata value
pub trait DateExtractor: Send + Sync {
    /// Parse a structured metadata value (e.g. `publication_date`)
    fn parse(&self, value: &str) -> Option<DateTime<Utc>>;

    /// Extract the first recognizable date from text content
    fn extract(&self, text: &str) -> Option<DateTime<Utc>>;
}

/// Extracts numeric/statistical claim fragments from text
pub trait ClaimExtractor: Send + Sync {
    /// Extract up to `limit` claims
    fn claims(&self, text: &str, limit: usize) -> Vec<Claim>;

    /// Extract up to `limit` statistical data points
    fn statistics(&self, text: &str, limit: usize) -> Vec<Statistic>;
}

/// Extracts citation URLs from text
pub trait CitationExtractor: Send + Sync {
    /// Extract up to `limit` unique URLs, in order of first appearance
    fn citations(&self, text: &str, limit: usize) -> Vec<String>;
}
