//! Shared domain types

pub mod content;
pub mod registry;
pub mod source;
pub mod verification;

pub use content::{ContentFormat, ContentItem};
pub use registry::{BlockedSourceEntry, TrustedSourceEntry};
pub use source::{extract_domain, Source, SourceStatus, SourceType};
pub use verification::{
    ConsensusValue, Contradiction, ReliabilityRating, SourceComparison, ValidationRecord,
    VerificationRecord, VerificationStatus,
};
