//! # Credence Common
//!
//! Shared types and errors for the Credence content-verification engine.
//!
//! ## Core Types
//!
//! - [`Source`]: a registered external content provider with reliability history
//! - [`ContentItem`]: one collected piece of content, immutable after acquisition
//! - [`TrustedSourceEntry`]/[`BlockedSourceEntry`]: explicit domain allow/deny entries
//! - [`VerificationRecord`]: append-only audit record per source assessment run
//! - [`ValidationRecord`]: audit record per cross-validation run of an item
//!
//! ## Invariants
//!
//! - Every reliability/trust score lives in `[0, 1]`
//! - A blocked source's record always carries `status=failed`, score 0.0
//! - `matching + contradicting == total_compared` on every validation
//! - `is_validated` iff agreement percentage is at least 50

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{CredenceError, EntityKind, RegistryError, Result};
pub use types::{
    content::{ContentFormat, ContentItem},
    registry::{BlockedSourceEntry, TrustedSourceEntry},
    source::{extract_domain, Source, SourceStatus, SourceType},
    verification::{
        ConsensusValue, Contradiction, ReliabilityRating, SourceComparison, ValidationRecord,
        VerificationRecord, VerificationStatus,
    },
};

/// Credence version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Issue tag appended when a source is in the block list
pub const ISSUE_BLOCKED_SOURCE: &str = "blocked_source";

/// Issue tag appended when content age exceeds its category threshold
pub const ISSUE_OUTDATED_CONTENT: &str = "outdated_content";

/// Issue tag appended when the fact-check pass ratio is not met
pub const ISSUE_FAILED_FACT_CHECK: &str = "failed_fact_check";
