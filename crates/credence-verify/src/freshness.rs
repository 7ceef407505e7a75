//! Content freshness checking
//!
//! Resolves an effective content date, compares its age against a
//! category threshold, and produces a linearly decaying freshness score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

use credence_common::{
    ContentItem, VerificationRecord, VerificationStatus, ISSUE_OUTDATED_CONTENT,
};

use crate::config::VerifyConfig;
use crate::extract::DateExtractor;

/// Metadata keys consulted for a structured publication date, in order
const METADATA_DATE_KEYS: [&str; 2] = ["publication_date", "date"];

/// How the effective content date was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrigin {
    /// The item's explicit content_date field
    Explicit,
    /// A structured metadata key
    Metadata,
    /// Pattern extraction from the content body
    TextExtraction,
    /// Fell back to the collection date
    CollectedDate,
}

/// Result of one freshness check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreshnessReport {
    /// Effective content date
    pub content_date: DateTime<Utc>,
    /// How the date was resolved
    pub date_origin: DateOrigin,
    /// Age in days at check time
    pub days_old: i64,
    /// Category threshold applied, in days
    pub threshold_days: i64,
    /// Age within threshold
    pub is_fresh: bool,
    /// Linear decay from 1.0 at age 0 to 0.0 at 2x threshold
    pub freshness_score: f64,
    /// Human-readable warning when stale
    pub warning: Option<String>,
}

/// Checks content staleness against category thresholds
pub struct FreshnessChecker {
    config: VerifyConfig,
    dates: Arc<dyn DateExtractor>,
}

impl FreshnessChecker {
    /// Create a checker with the given date extractor
    pub fn new(config: VerifyConfig, dates: Arc<dyn DateExtractor>) -> Self {
        Self { config, dates }
    }

    /// Check whether an item is fresh for its category
    #[instrument(skip(self, item), fields(item = %item.id))]
    pub fn check(&self, item: &ContentItem, category: &str) -> FreshnessReport {
        let (content_date, date_origin) = self.resolve_content_date(item);
        let threshold = self.config.freshness_threshold(category);
        let days_old = (Utc::now() - content_date).num_days();
        let is_fresh = days_old <= threshold;

        let warning = (!is_fresh).then(|| {
            format!("Content is {days_old} days old, exceeds threshold of {threshold} days")
        });

        debug!(days_old, threshold, is_fresh, ?date_origin, "Freshness checked");

        FreshnessReport {
            content_date,
            date_origin,
            days_old,
            threshold_days: threshold,
            is_fresh,
            freshness_score: freshness_score(days_old, threshold),
            warning,
        }
    }

    /// Fold a freshness result into a verification record
    ///
    /// Stale content appends the outdated issue and downgrades a verified
    /// status to flagged; a freshness check never upgrades a status.
    pub fn apply(&self, record: &mut VerificationRecord, report: &FreshnessReport) {
        record.last_update_check = Some(Utc::now());
        record.content_date = Some(report.content_date);
        record.is_outdated = !report.is_fresh;
        record.days_since_update = Some(report.days_old);

        if !report.is_fresh {
            record.add_issue(ISSUE_OUTDATED_CONTENT);
            if record.status == VerificationStatus::Verified {
                record.status = VerificationStatus::Flagged;
            }
        }

        if let Ok(value) = serde_json::to_value(report) {
            record.metadata.insert("freshness_check".to_string(), value);
        }
    }

    /// Resolve the effective content date with documented priority:
    /// explicit field, structured metadata keys, text extraction, then
    /// the collection date as last resort
    fn resolve_content_date(&self, item: &ContentItem) -> (DateTime<Utc>, DateOrigin) {
        if let Some(date) = item.content_date {
            return (date, DateOrigin::Explicit);
        }

        for key in METADATA_DATE_KEYS {
            if let Some(Value::String(raw)) = item.metadata.get(key) {
                if let Some(date) = self.dates.parse(raw) {
                    return (date, DateOrigin::Metadata);
                }
            }
        }

        if let Some(date) = self.dates.extract(item.body()) {
            return (date, DateOrigin::TextExtraction);
        }

        (item.collected_date, DateOrigin::CollectedDate)
    }
}

/// Linear decay from 1.0 at age zero to 0.0 at twice the threshold
pub fn freshness_score(days_old: i64, threshold: i64) -> f64 {
    if days_old <= 0 {
        return 1.0;
    }
    if threshold <= 0 || days_old >= threshold * 2 {
        return 0.0;
    }
    (1.0 - days_old as f64 / (threshold as f64 * 2.0)).clamp(0.0, 1.0)
}
