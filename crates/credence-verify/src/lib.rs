//! # Credence Verify
//!
//! Content-source verification engine: reliability scoring, freshness
//! checking, cross-validation against independent sources, and
//! fact-checking of numeric claims and citations.
//!
//! ## Key Concepts
//!
//! - **Trust registry**: explicit allow/deny lists over domains; deny wins
//! - **Reliability assessment**: weighted composite over domain trust,
//!   fetch history, recency and content-type quality
//! - **Cross-validation**: similarity-based agreement among items
//!   collected independently in the same session
//! - **Fact-checking**: bounded claim/citation extraction plus
//!   reachability probing
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   VerificationService                     │
//! │  ┌────────────┐ ┌───────────┐ ┌──────────┐ ┌──────────┐  │
//! │  │Reliability │ │ Freshness │ │ CrossVal │ │FactCheck │  │
//! │  │ Assessor   │ │  Checker  │ │ idator   │ │   er     │  │
//! │  └─────┬──────┘ └─────┬─────┘ └────┬─────┘ └────┬─────┘  │
//! │        │              │            │            │        │
//! │  ┌─────┴──────┐ ┌─────┴─────┐ ┌────┴─────┐ ┌────┴─────┐  │
//! │  │TrustRegistry│ │DateExtract│ │similarity│ │ Probing  │  │
//! │  │ allow/deny │ │ metadata+ │ │ + diffs  │ │ + claims │  │
//! │  └────────────┘ │   text    │ └──────────┘ └──────────┘  │
//! │                 └───────────┘                             │
//! │  ┌─────────────────────────────────────────────────────┐ │
//! │  │            SourceStore / ContentStore               │ │
//! │  │     (version-checked reliability write-back)        │ │
//! │  └─────────────────────────────────────────────────────┘ │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Assessment itself is pure: engines read inputs and produce records;
//! the single mutation, the reliability score write-back, goes through a
//! compare-and-set on the source's version counter.

pub mod config;
pub mod crossval;
pub mod extract;
pub mod factcheck;
pub mod freshness;
pub mod probe;
pub mod registry;
pub mod reliability;
pub mod service;
pub mod similarity;
pub mod store;

// Re-export the engines and their reports
pub use config::{
    CrossValidationSettings, ExtractionLimits, ProbeSettings, ScoreWeights, VerifyConfig,
};
pub use crossval::CrossValidator;
pub use extract::{
    CitationExtractor, Claim, ClaimExtractor, ClaimKind, DateExtractor, PatternClaimExtractor,
    RegexDateExtractor, Statistic, UrlCitationExtractor,
};
pub use factcheck::{CitationSummary, FactCheckReport, FactChecker};
pub use freshness::{DateOrigin, FreshnessChecker, FreshnessReport};
pub use probe::{CitationOutcome, CitationProber, HttpProber, StaticProber};
pub use registry::TrustRegistry;
pub use reliability::{
    content_quality_score, default_domain_rules, fetch_recency_score, DomainRule,
    ReliabilityAssessor,
};
pub use service::{
    CompositeAssessment, ConfidenceLevel, OverallAssessment, ReportSummary, TrustTier,
    VerificationReport, VerificationService,
};
pub use similarity::{compare_content, similarity_ratio, ContentComparison};
pub use store::{
    ContentStore, InMemoryContentStore, InMemorySourceStore, SourceStore, StoreError,
};

/// Engine version
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default similarity ratio above which two items count as matching
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Default cap on sibling items gathered per cross-validation
pub const DEFAULT_SIBLING_LIMIT: usize = 10;

/// Maximum difference lines recorded per non-matching comparison
pub const MAX_RECORDED_DIFFERENCES: usize = 50;

/// Default per-probe timeout in seconds
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Maximum citations probed per fact-check call
pub const CITATION_PROBE_LIMIT: usize = 20;

/// Maximum numeric claims extracted per item
pub const CLAIM_EXTRACTION_LIMIT: usize = 20;

/// Maximum statistics extracted per item
pub const STATISTIC_EXTRACTION_LIMIT: usize = 30;

/// Maximum unique citation URLs extracted per item
pub const CITATION_EXTRACTION_LIMIT: usize = 50;

/// Freshness threshold applied to unknown content categories, in days
pub const DEFAULT_FRESHNESS_THRESHOLD_DAYS: i64 = 180;
