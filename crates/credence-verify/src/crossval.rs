//! Cross-validation of content against sibling sources
//!
//! Compares one item's body with independently collected copies from other
//! sources, tallies agreement, and derives a consensus confidence. A pair
//! "matches" when its diff-ratio similarity meets the configured threshold.

use chrono::Utc;
use ordered_float::OrderedFloat;
use tracing::{debug, instrument};

use credence_common::{
    ConsensusValue, ContentItem, Contradiction, SourceComparison, ValidationRecord,
    VerificationStatus,
};

use crate::config::CrossValidationSettings;
use crate::similarity::compare_content;

/// Difference lines kept per recorded contradiction
const CONTRADICTION_DIFF_LIMIT: usize = 10;

/// Characters kept per contradiction snippet
const SNIPPET_LEN: usize = 200;

/// Validates items by comparing them across sources
pub struct CrossValidator {
    settings: CrossValidationSettings,
}

impl CrossValidator {
    /// Create a validator
    pub fn new(settings: CrossValidationSettings) -> Self {
        Self { settings }
    }

    /// Current similarity threshold
    pub fn similarity_threshold(&self) -> f64 {
        self.settings.similarity_threshold
    }

    /// Set the similarity threshold; values outside [0, 1] are rejected
    pub fn set_similarity_threshold(&mut self, threshold: f64) -> credence_common::Result<()> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(credence_common::CredenceError::InvalidInput(format!(
                "similarity threshold out of range: {threshold}"
            )));
        }
        self.settings.similarity_threshold = threshold;
        Ok(())
    }

    /// Cross-validate an item against sibling items from other sources
    #[instrument(skip(self, item, siblings), fields(item = %item.id, siblings = siblings.len()))]
    pub fn validate(&self, item: &ContentItem, siblings: &[ContentItem]) -> ValidationRecord {
        if siblings.is_empty() {
            return self.unvalidated(item);
        }

        let mut comparisons = Vec::with_capacity(siblings.len());
        let mut contradictions = Vec::new();

        for sibling in siblings {
            let cmp = compare_content(
                item.body(),
                sibling.body(),
                self.settings.similarity_threshold,
                self.settings.max_differences,
            );
            if !cmp.is_matching {
                contradictions.push(Contradiction {
                    source_id: sibling.source_id,
                    similarity: cmp.similarity,
                    differences: cmp
                        .differences
                        .iter()
                        .take(CONTRADICTION_DIFF_LIMIT)
                        .cloned()
                        .collect(),
                    primary_snippet: snippet(item.body()),
                    contradicting_snippet: snippet(sibling.body()),
                });
            }
            comparisons.push(SourceComparison {
                source_id: sibling.source_id,
                similarity: cmp.similarity,
                is_matching: cmp.is_matching,
                differences: cmp.differences,
            });
        }

        // Strongest agreement first; stable output for audit readers
        comparisons.sort_by_key(|c| std::cmp::Reverse(OrderedFloat(c.similarity)));

        let total = comparisons.len() as u32;
        let matching = comparisons.iter().filter(|c| c.is_matching).count() as u32;
        let contradicting = total - matching;

        let agreement_percentage = matching as f64 / total as f64 * 100.0;
        let is_validated = agreement_percentage >= 50.0;
        let validation_status = validation_status(agreement_percentage);
        let confidence = confidence_score(matching, total);

        let supporting_sources = comparisons
            .iter()
            .filter(|c| c.is_matching)
            .map(|c| c.source_id)
            .collect();

        debug!(
            matching,
            contradicting, agreement_percentage, confidence, "Cross-validation completed"
        );

        ValidationRecord {
            id: uuid::Uuid::new_v4(),
            content_item_id: item.id,
            is_validated,
            validation_status,
            matching_sources_count: matching,
            contradicting_sources_count: contradicting,
            consensus: ConsensusValue::PrimaryEcho(item.body().to_string()),
            confidence_score: Some(confidence),
            agreement_percentage: Some(agreement_percentage),
            comparisons,
            detail_note: None,
            contradictions,
            supporting_sources,
            created_at: Utc::now(),
            validated_at: is_validated.then(Utc::now),
        }
    }

    /// Record for an item with nothing to compare against
    fn unvalidated(&self, item: &ContentItem) -> ValidationRecord {
        ValidationRecord {
            id: uuid::Uuid::new_v4(),
            content_item_id: item.id,
            is_validated: false,
            validation_status: VerificationStatus::Pending,
            matching_sources_count: 0,
            contradicting_sources_count: 0,
            consensus: ConsensusValue::NotComputed,
            confidence_score: None,
            agreement_percentage: None,
            comparisons: Vec::new(),
            detail_note: Some("No related data available for cross-validation".to_string()),
            contradictions: Vec::new(),
            supporting_sources: Vec::new(),
            created_at: Utc::now(),
            validated_at: None,
        }
    }
}

/// Consensus confidence from the agreement ratio
///
/// One comparison halves the base (low-sample penalty); five or more
/// scale it by 1.2 capped at 1.0 (high-sample bonus).
pub fn confidence_score(matching: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let base = matching as f64 / total as f64;
    match total {
        1 => base * 0.5,
        n if n >= 5 => (base * 1.2).min(1.0),
        _ => base,
    }
}

/// Status from the agreement percentage: 80/50 bands
pub fn validation_status(agreement_percentage: f64) -> VerificationStatus {
    if agreement_percentage >= 80.0 {
        VerificationStatus::Verified
    } else if agreement_percentage >= 50.0 {
        VerificationStatus::Flagged
    } else {
        VerificationStatus::Failed
    }
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LEN).collect()
}
