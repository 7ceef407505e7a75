//! Source - a registered external content provider
//!
//! Sources are created by the acquisition layer. The verification core
//! reads them and writes back exactly one field, `reliability_score`,
//! through a version-checked store operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of mechanism a source is collected through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    WebScraping,
    Api,
    News,
    Government,
    SocialMedia,
    Database,
}

/// Operational status of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Active,
    Inactive,
    Failed,
    RateLimited,
}

/// A registered content source with its reliability history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Unique identifier
    pub id: Uuid,

    /// Human-readable name (unique in the source store)
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Collection mechanism
    pub source_type: SourceType,

    /// Page or endpoint URL the source is collected from
    pub url: Option<String>,

    /// Content category, e.g. "market_data", "news", "statistics"
    pub category: Option<String>,

    /// Weighted reliability estimate in [0, 1]
    pub reliability_score: f64,

    /// Historical fetch success rate in [0, 1]
    pub success_rate: f64,

    /// Operational status
    pub status: SourceStatus,

    /// Last time a fetch from this source succeeded
    pub last_successful_fetch: Option<DateTime<Utc>>,

    /// Last time a fetch from this source failed
    pub last_failed_fetch: Option<DateTime<Utc>>,

    /// Version counter for optimistic-concurrency score writes
    pub version: u64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Source {
    /// Create a new active source with neutral scores
    pub fn new(name: impl Into<String>, source_type: SourceType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            source_type,
            url: None,
            category: None,
            reliability_score: 0.5,
            success_rate: 1.0,
            status: SourceStatus::Active,
            last_successful_fetch: None,
            last_failed_fetch: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the URL (builder-style, used heavily in tests)
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the historical success rate
    pub fn with_success_rate(mut self, rate: f64) -> Self {
        self.success_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Set the last successful fetch time
    pub fn with_last_successful_fetch(mut self, at: DateTime<Utc>) -> Self {
        self.last_successful_fetch = Some(at);
        self
    }

    /// Domain part of the source URL, if one is set
    ///
    /// Strips scheme, credentials, path, query and port. Returns `None`
    /// for sources without a URL.
    pub fn domain(&self) -> Option<String> {
        self.url.as_deref().map(extract_domain)
    }

    /// Apply a verified score, clamping into [0, 1] and bumping the version
    pub fn apply_score(&mut self, score: f64) {
        self.reliability_score = score.clamp(0.0, 1.0);
        self.version += 1;
        self.updated_at = Utc::now();
    }
}

/// Extract the host portion of a URL-ish string
///
/// Intentionally forgiving: the acquisition layer stores raw user input
/// here, so this must never panic on malformed URLs.
pub fn extract_domain(url: &str) -> String {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    // Drop userinfo, then cut at the first path/query/fragment separator
    let rest = rest.rsplit_once('@').map(|(_, host)| host).unwrap_or(rest);
    let host = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(rest);
    let host = host.split(':').next().unwrap_or(host);
    host.to_ascii_lowercase()
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Source({}, {:?}, reliability={:.2})",
            self.name, self.source_type, self.reliability_score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_source_defaults() {
        let source = Source::new("Test", SourceType::News);
        assert_eq!(source.status, SourceStatus::Active);
        assert!((source.reliability_score - 0.5).abs() < f64::EPSILON);
        assert_eq!(source.version, 0);
    }

    #[test]
    fn test_domain_extraction() {
        assert_eq!(extract_domain("https://www.example.com/a/b?q=1"), "www.example.com");
        assert_eq!(extract_domain("http://user:pw@stats.gov:8080/data"), "stats.gov");
        assert_eq!(extract_domain("example.com"), "example.com");
        assert_eq!(extract_domain("Example.COM/path"), "example.com");
    }

    #[test]
    fn test_apply_score_clamps_and_versions() {
        let mut source = Source::new("Test", SourceType::Api);
        source.apply_score(1.7);
        assert!((source.reliability_score - 1.0).abs() < f64::EPSILON);
        assert_eq!(source.version, 1);

        source.apply_score(-0.2);
        assert!(source.reliability_score.abs() < f64::EPSILON);
        assert_eq!(source.version, 2);
    }
}
