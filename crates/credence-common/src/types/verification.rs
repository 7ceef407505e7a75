//! Verification audit records
//!
//! [`VerificationRecord`] is the append-only audit object for one source
//! assessment run; [`ValidationRecord`] for one cross-validation run of a
//! content item. Both serialize with `Option` fields as nulls so that
//! field presence survives a round trip (a rating is null until the first
//! assessment sets it).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Status of a verification or validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Failed,
    /// Disputed data: usable but needs review
    Flagged,
    Outdated,
}

/// Source reliability rating band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityRating {
    /// 0.9 - 1.0
    Excellent,
    /// 0.7 - 0.89
    Good,
    /// 0.5 - 0.69
    Fair,
    /// 0.3 - 0.49
    Poor,
    /// 0.0 - 0.29
    Unreliable,
}

impl ReliabilityRating {
    /// Map a reliability score to its rating band
    ///
    /// Deterministic table-driven mapping; thresholds are fixed by the
    /// audit format, not configurable.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            ReliabilityRating::Excellent
        } else if score >= 0.7 {
            ReliabilityRating::Good
        } else if score >= 0.5 {
            ReliabilityRating::Fair
        } else if score >= 0.3 {
            ReliabilityRating::Poor
        } else {
            ReliabilityRating::Unreliable
        }
    }
}

impl VerificationStatus {
    /// Map a reliability score to a verification status
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            VerificationStatus::Verified
        } else if score >= 0.5 {
            VerificationStatus::Flagged
        } else {
            VerificationStatus::Failed
        }
    }
}

/// Append-only audit record for one source assessment run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Unique identifier
    pub id: Uuid,

    /// Source this record assesses
    pub source_id: Uuid,

    /// Run status
    pub status: VerificationStatus,

    /// Rating band, unset until a full assessment has run
    pub reliability_rating: Option<ReliabilityRating>,

    // Reliability metrics
    /// Weighted composite score in [0, 1]
    pub reliability_score: Option<f64>,
    /// Domain-reputation component
    pub trustworthiness_score: Option<f64>,
    /// Content-quality component
    pub content_quality_score: Option<f64>,

    // Freshness check
    pub last_update_check: Option<DateTime<Utc>>,
    /// Claimed publication date of the checked content
    pub content_date: Option<DateTime<Utc>>,
    pub is_outdated: bool,
    pub days_since_update: Option<i64>,

    // Cross-validation
    /// Number of sibling sources compared
    pub cross_validation_count: u32,
    /// Agreement with other sources
    pub consensus_score: Option<f64>,
    pub has_contradictions: bool,

    // Fact-checking
    pub fact_check_performed: bool,
    pub fact_check_passed: Option<bool>,
    pub verified_claims: u32,
    pub total_claims: u32,

    // Details
    pub notes: Option<String>,
    /// Machine-readable issue tags, e.g. "blocked_source"
    pub issues_found: Vec<String>,
    /// Per-stage breakdowns (sub-scores, freshness report, fact-check report)
    pub metadata: Map<String, Value>,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl VerificationRecord {
    /// Create a pending record with no assessment data
    pub fn pending(source_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            source_id,
            status: VerificationStatus::Pending,
            reliability_rating: None,
            reliability_score: None,
            trustworthiness_score: None,
            content_quality_score: None,
            last_update_check: None,
            content_date: None,
            is_outdated: false,
            days_since_update: None,
            cross_validation_count: 0,
            consensus_score: None,
            has_contradictions: false,
            fact_check_performed: false,
            fact_check_passed: None,
            verified_claims: 0,
            total_claims: 0,
            notes: None,
            issues_found: Vec::new(),
            metadata: Map::new(),
            created_at: now,
            updated_at: now,
            verified_at: None,
        }
    }

    /// Append an issue tag if not already present
    pub fn add_issue(&mut self, issue: impl Into<String>) {
        let issue = issue.into();
        if !self.issues_found.contains(&issue) {
            self.issues_found.push(issue);
        }
        self.updated_at = Utc::now();
    }

    /// Append a note, newline-separated after any existing text
    pub fn add_note(&mut self, note: impl AsRef<str>) {
        match &mut self.notes {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(note.as_ref());
            }
            None => self.notes = Some(note.as_ref().to_string()),
        }
        self.updated_at = Utc::now();
    }
}

/// Consensus outcome of a cross-validation run
///
/// True claim-level consensus (extract the same fact from N sources and
/// vote) is not computed. The validator echoes the primary item's content
/// so downstream consumers can still render something, and this enum keeps
/// that distinction explicit instead of pretending an agreed value exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConsensusValue {
    /// No comparison data was available
    NotComputed,
    /// The primary item's content, unchanged; not a multi-source consensus
    PrimaryEcho(String),
}

impl ConsensusValue {
    /// Whether a real multi-source consensus was computed (currently never)
    pub fn is_computed(&self) -> bool {
        false
    }
}

/// One pairwise comparison against a sibling item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceComparison {
    /// Source the sibling item came from
    pub source_id: Uuid,
    /// Similarity ratio in [0, 1]
    pub similarity: f64,
    /// Whether the pair met the similarity threshold
    pub is_matching: bool,
    /// Bounded list of textual differences for non-matching pairs
    pub differences: Vec<String>,
}

/// A recorded contradiction between the primary item and one sibling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contradiction {
    pub source_id: Uuid,
    pub similarity: f64,
    /// At most ten difference lines
    pub differences: Vec<String>,
    /// Leading snippet of the primary content
    pub primary_snippet: String,
    /// Leading snippet of the contradicting content
    pub contradicting_snippet: String,
}

/// Audit record for one cross-validation run of a content item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Unique identifier
    pub id: Uuid,

    /// Item that was validated
    pub content_item_id: Uuid,

    /// True iff agreement reached at least 50%
    pub is_validated: bool,

    /// Run status
    pub validation_status: VerificationStatus,

    /// Siblings whose content matched
    pub matching_sources_count: u32,

    /// Siblings whose content contradicted
    pub contradicting_sources_count: u32,

    /// Consensus outcome (explicitly not a computed consensus, see enum docs)
    pub consensus: ConsensusValue,

    /// Confidence in [0, 1], unset when nothing was compared
    pub confidence_score: Option<f64>,

    /// Share of siblings in agreement, 0-100
    pub agreement_percentage: Option<f64>,

    /// Per-pair comparison details
    pub comparisons: Vec<SourceComparison>,

    /// Free-form detail note (e.g. why nothing was compared)
    pub detail_note: Option<String>,

    /// Contradicting pairs with snippets
    pub contradictions: Vec<Contradiction>,

    /// Sources whose items matched the primary
    pub supporting_sources: Vec<Uuid>,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
}

impl ValidationRecord {
    /// Total number of siblings compared
    pub fn total_compared(&self) -> u32 {
        self.matching_sources_count + self.contradicting_sources_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bands() {
        assert_eq!(ReliabilityRating::from_score(0.95), ReliabilityRating::Excellent);
        assert_eq!(ReliabilityRating::from_score(0.9), ReliabilityRating::Excellent);
        assert_eq!(ReliabilityRating::from_score(0.89), ReliabilityRating::Good);
        assert_eq!(ReliabilityRating::from_score(0.5), ReliabilityRating::Fair);
        assert_eq!(ReliabilityRating::from_score(0.3), ReliabilityRating::Poor);
        assert_eq!(ReliabilityRating::from_score(0.0), ReliabilityRating::Unreliable);
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(VerificationStatus::from_score(0.7), VerificationStatus::Verified);
        assert_eq!(VerificationStatus::from_score(0.69), VerificationStatus::Flagged);
        assert_eq!(VerificationStatus::from_score(0.49), VerificationStatus::Failed);
    }

    #[test]
    fn test_add_issue_deduplicates() {
        let mut record = VerificationRecord::pending(Uuid::new_v4());
        record.add_issue("outdated_content");
        record.add_issue("outdated_content");
        assert_eq!(record.issues_found.len(), 1);
    }

    #[test]
    fn test_rating_absent_until_assessed_roundtrip() {
        let record = VerificationRecord::pending(Uuid::new_v4());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("reliability_rating").unwrap().is_null());
        assert!(json.get("reliability_score").unwrap().is_null());

        let back: VerificationRecord = serde_json::from_value(json).unwrap();
        assert!(back.reliability_rating.is_none());
        assert_eq!(back.status, VerificationStatus::Pending);
    }

    #[test]
    fn test_consensus_is_never_computed() {
        assert!(!ConsensusValue::NotComputed.is_computed());
        assert!(!ConsensusValue::PrimaryEcho("x".into()).is_computed());
    }
}
