//! Verification orchestration
//!
//! Wires the four engines together over the store and registry seams,
//! keeps per-entity audit history, and synthesizes a composite trust
//! verdict for content items.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use credence_common::{
    BlockedSourceEntry, ContentItem, CredenceError, EntityKind, Result, Source, SourceStatus,
    TrustedSourceEntry, ValidationRecord, VerificationRecord, VerificationStatus,
    ISSUE_BLOCKED_SOURCE,
};

use crate::config::VerifyConfig;
use crate::crossval::CrossValidator;
use crate::extract::{PatternClaimExtractor, RegexDateExtractor, UrlCitationExtractor};
use crate::factcheck::{FactCheckReport, FactChecker};
use crate::freshness::FreshnessChecker;
use crate::probe::{CitationProber, HttpProber};
use crate::registry::TrustRegistry;
use crate::reliability::ReliabilityAssessor;
use crate::store::{ContentStore, SourceStore, StoreError};

/// Trust tier derived from the source reliability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustTier {
    High,
    Medium,
    Low,
}

impl TrustTier {
    fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            TrustTier::High
        } else if score >= 0.5 {
            TrustTier::Medium
        } else {
            TrustTier::Low
        }
    }
}

/// Confidence in the composite verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Composite verdict synthesized across all stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallAssessment {
    /// Final trust verdict
    pub is_trustworthy: bool,
    /// Tier derived from the source reliability score
    pub trust_tier: TrustTier,
    /// Confidence in the verdict
    pub confidence_level: ConfidenceLevel,
    /// Hard problems surfaced by the stages
    pub issues: Vec<String>,
    /// Soft concerns that do not fail the item outright
    pub warnings: Vec<String>,
    /// Suggested operator actions
    pub recommendations: Vec<String>,
}

/// Full output of a content verification run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeAssessment {
    pub item_id: Uuid,
    pub source_id: Uuid,
    /// Audit record accumulated across the stages
    pub record: VerificationRecord,
    /// Present when cross-validation ran
    pub validation: Option<ValidationRecord>,
    /// Present when fact-checking ran
    pub fact_check: Option<FactCheckReport>,
    pub overall: OverallAssessment,
}

/// Aggregate counts over a set of records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_records: usize,
    pub verified: usize,
    pub flagged: usize,
    pub failed: usize,
    pub total_validations: usize,
    pub validated: usize,
}

/// Snapshot report over recorded verification history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub generated_at: chrono::DateTime<Utc>,
    pub records: Vec<VerificationRecord>,
    pub validations: Vec<ValidationRecord>,
    pub summary: ReportSummary,
}

/// Orchestrates source and content verification
pub struct VerificationService {
    sources: Arc<dyn SourceStore>,
    content: Arc<dyn ContentStore>,
    registry: Arc<TrustRegistry>,
    reliability: ReliabilityAssessor,
    freshness: FreshnessChecker,
    cross_validator: CrossValidator,
    fact_checker: FactChecker,
    config: VerifyConfig,
    records: DashMap<Uuid, Vec<VerificationRecord>>,
    validations: DashMap<Uuid, Vec<ValidationRecord>>,
}

impl VerificationService {
    /// Create a service with default extractors and a live HTTP prober
    pub fn new(
        sources: Arc<dyn SourceStore>,
        content: Arc<dyn ContentStore>,
        registry: Arc<TrustRegistry>,
        config: VerifyConfig,
    ) -> Self {
        let prober = Arc::new(HttpProber::new(&config.probe));
        Self::with_prober(sources, content, registry, config, prober)
    }

    /// Create a service with an injected citation prober
    ///
    /// Tests inject a deterministic prober here so no verification path
    /// touches the network.
    pub fn with_prober(
        sources: Arc<dyn SourceStore>,
        content: Arc<dyn ContentStore>,
        registry: Arc<TrustRegistry>,
        config: VerifyConfig,
        prober: Arc<dyn CitationProber>,
    ) -> Self {
        let reliability = ReliabilityAssessor::new(registry.clone(), config.weights.clone());
        let freshness =
            FreshnessChecker::new(config.clone(), Arc::new(RegexDateExtractor::new()));
        let cross_validator = CrossValidator::new(config.cross_validation.clone());
        let fact_checker = FactChecker::new(
            Arc::new(PatternClaimExtractor::new()),
            Arc::new(UrlCitationExtractor::new()),
            prober,
            config.limits.clone(),
            config.probe.clone(),
        );

        Self {
            sources,
            content,
            registry,
            reliability,
            freshness,
            cross_validator,
            fact_checker,
            config,
            records: DashMap::new(),
            validations: DashMap::new(),
        }
    }

    /// Assess a source's reliability and persist the score
    ///
    /// With `full_check`, the latest collected item for a previously
    /// fetched source is also checked for freshness and folded into the
    /// record. The score write is version-checked; on a conflict with a
    /// concurrent assessment it re-reads once and retries.
    #[instrument(skip(self), fields(source_id = %source_id))]
    pub async fn verify_source(
        &self,
        source_id: &Uuid,
        full_check: bool,
    ) -> Result<VerificationRecord> {
        let source = self
            .sources
            .get(source_id)
            .await
            .ok_or_else(|| CredenceError::NotFound {
                kind: EntityKind::Source,
                id: source_id.to_string(),
            })?;

        let mut record = self.reliability.assess(&source);
        let blocked = record
            .issues_found
            .iter()
            .any(|i| i == ISSUE_BLOCKED_SOURCE);

        // A blocked source fails outright; its record carries no freshness data
        if full_check && !blocked && source.last_successful_fetch.is_some() {
            if let Some(item) = self.content.latest_for_source(source_id).await {
                let category = source.category.as_deref().unwrap_or("general");
                let report = self.freshness.check(&item, category);
                self.freshness.apply(&mut record, &report);
            }
        }

        self.persist_score(&source, &record).await?;
        info!(
            status = ?record.status,
            score = record.reliability_score,
            "Source verified"
        );

        self.records
            .entry(*source_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    /// Verify a content item end to end
    ///
    /// Always assesses the owning source, commits its score, and checks
    /// freshness of the item itself. Cross-validation and fact-checking
    /// are opt-in per call; each stage folds its outcome into one audit
    /// record.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn verify_content(
        &self,
        item_id: &Uuid,
        cross_validate: bool,
        fact_check: bool,
    ) -> Result<CompositeAssessment> {
        let item = self
            .content
            .get(item_id)
            .await
            .ok_or_else(|| CredenceError::NotFound {
                kind: EntityKind::ContentItem,
                id: item_id.to_string(),
            })?;
        let source = self
            .sources
            .get(&item.source_id)
            .await
            .ok_or_else(|| CredenceError::NotFound {
                kind: EntityKind::Source,
                id: item.source_id.to_string(),
            })?;

        let mut record = self.reliability.assess(&source);
        self.persist_score(&source, &record).await?;

        let category = item
            .metadata
            .get("category")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| source.category.clone())
            .unwrap_or_else(|| "general".to_string());
        let freshness_report = self.freshness.check(&item, &category);
        self.freshness.apply(&mut record, &freshness_report);

        let validation = if cross_validate {
            Some(self.cross_validate_item(&item, &mut record).await)
        } else {
            None
        };

        let fact_report = if fact_check {
            let report = self.fact_checker.check(&item, &mut record).await;
            self.fact_checker.flag_unverified(&mut record);
            Some(report)
        } else {
            None
        };

        let overall = self.synthesize(&record, validation.as_ref(), &freshness_report.warning);
        if !overall.is_trustworthy {
            warn!(item = %item.id, issues = record.issues_found.len(), "Content not trustworthy");
        }

        self.records
            .entry(item.source_id)
            .or_default()
            .push(record.clone());

        Ok(CompositeAssessment {
            item_id: item.id,
            source_id: item.source_id,
            record,
            validation,
            fact_check: fact_report,
            overall,
        })
    }

    /// Cross-validate an item against its session siblings
    async fn cross_validate_item(
        &self,
        item: &ContentItem,
        record: &mut VerificationRecord,
    ) -> ValidationRecord {
        let siblings = match item.session_id {
            Some(session) => {
                self.content
                    .siblings(
                        &session,
                        &item.source_id,
                        self.config.cross_validation.sibling_limit,
                    )
                    .await
            }
            None => Vec::new(),
        };

        let validation = self.cross_validator.validate(item, &siblings);

        record.cross_validation_count = validation.total_compared();
        record.consensus_score = validation.agreement_percentage;
        record.has_contradictions = validation.contradicting_sources_count > 0;
        if validation.validation_status == VerificationStatus::Failed
            && record.status != VerificationStatus::Failed
        {
            record.status = VerificationStatus::Flagged;
        }

        self.validations
            .entry(item.id)
            .or_default()
            .push(validation.clone());
        validation
    }

    /// Write the assessed score back, retrying once on a version conflict
    async fn persist_score(&self, source: &Source, record: &VerificationRecord) -> Result<Source> {
        let score = record.reliability_score.unwrap_or(0.0);
        let status = record
            .issues_found
            .iter()
            .any(|i| i == ISSUE_BLOCKED_SOURCE)
            .then_some(SourceStatus::Failed);

        match self
            .sources
            .update_reliability(&source.id, score, status, source.version)
            .await
        {
            Ok(updated) => Ok(updated),
            Err(StoreError::VersionConflict { .. }) => {
                // A concurrent assessment won the first write; re-read and retry once
                let fresh = self
                    .sources
                    .get(&source.id)
                    .await
                    .ok_or_else(|| CredenceError::NotFound {
                        kind: EntityKind::Source,
                        id: source.id.to_string(),
                    })?;
                self.sources
                    .update_reliability(&source.id, score, status, fresh.version)
                    .await
                    .map_err(Into::into)
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Synthesize the composite verdict from the accumulated record
    fn synthesize(
        &self,
        record: &VerificationRecord,
        validation: Option<&ValidationRecord>,
        freshness_warning: &Option<String>,
    ) -> OverallAssessment {
        let source_score = record.reliability_score.unwrap_or(0.0);
        let trust_tier = TrustTier::from_score(source_score);

        let mut issues = record.issues_found.clone();
        let mut warnings = Vec::new();
        let mut recommendations = Vec::new();

        if source_score < 0.5 {
            issues.push("Source has low reliability score".to_string());
        } else if source_score < 0.7 {
            warnings.push("Source has moderate reliability score".to_string());
        }

        if let Some(warning) = freshness_warning {
            warnings.push(warning.clone());
            recommendations.push("Refresh the content from its source".to_string());
        }

        let crossval_confidence = validation.and_then(|v| v.confidence_score);
        if crossval_confidence.is_some_and(|c| c < 0.5) {
            issues.push("Low confidence from cross-validation".to_string());
        }
        if let Some(validation) = validation {
            if validation.contradicting_sources_count > 0 {
                warnings.push(format!(
                    "{} source(s) contradict this content",
                    validation.contradicting_sources_count
                ));
                recommendations
                    .push("Review recorded contradictions before relying on this data".to_string());
            }
        }

        if record.fact_check_passed == Some(false) {
            warnings.push(format!(
                "Fact-check verified {}/{} claims",
                record.verified_claims, record.total_claims
            ));
        }

        // Either a reliable source or strong independent agreement earns trust;
        // weak agreement withdraws it regardless of the source score.
        let mut is_trustworthy =
            source_score >= 0.7 || crossval_confidence.is_some_and(|c| c >= 0.7);
        if crossval_confidence.is_some_and(|c| c < 0.5) {
            is_trustworthy = false;
        }

        if source_score < 0.7 {
            recommendations
                .push("Consider corroborating with a higher-reliability source".to_string());
        }

        let confidence_level = if issues.is_empty() && is_trustworthy {
            ConfidenceLevel::High
        } else if issues.len() > 2 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::Medium
        };

        OverallAssessment {
            is_trustworthy,
            trust_tier,
            confidence_level,
            issues,
            warnings,
            recommendations,
        }
    }

    /// Snapshot report over recorded history, optionally filtered
    ///
    /// `source_id` restricts verification records to one source;
    /// `item_id` restricts validation records to one item. With neither,
    /// the report covers everything recorded so far.
    pub fn report(
        &self,
        source_id: Option<&Uuid>,
        item_id: Option<&Uuid>,
    ) -> VerificationReport {
        let records: Vec<VerificationRecord> = match source_id {
            Some(id) => self
                .records
                .get(id)
                .map(|r| r.clone())
                .unwrap_or_default(),
            None => self
                .records
                .iter()
                .flat_map(|entry| entry.value().clone())
                .collect(),
        };
        let validations: Vec<ValidationRecord> = match item_id {
            Some(id) => self
                .validations
                .get(id)
                .map(|v| v.clone())
                .unwrap_or_default(),
            None => self
                .validations
                .iter()
                .flat_map(|entry| entry.value().clone())
                .collect(),
        };

        let summary = ReportSummary {
            total_records: records.len(),
            verified: records
                .iter()
                .filter(|r| r.status == VerificationStatus::Verified)
                .count(),
            flagged: records
                .iter()
                .filter(|r| r.status == VerificationStatus::Flagged)
                .count(),
            failed: records
                .iter()
                .filter(|r| r.status == VerificationStatus::Failed)
                .count(),
            total_validations: validations.len(),
            validated: validations.iter().filter(|v| v.is_validated).count(),
        };

        VerificationReport {
            generated_at: Utc::now(),
            records,
            validations,
            summary,
        }
    }

    /// Verification history for a source, oldest first
    pub fn history(&self, source_id: &Uuid) -> Vec<VerificationRecord> {
        self.records
            .get(source_id)
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Validation history for a content item, oldest first
    pub fn validation_history(&self, item_id: &Uuid) -> Vec<ValidationRecord> {
        self.validations
            .get(item_id)
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// The domain trust registry
    pub fn registry(&self) -> &TrustRegistry {
        &self.registry
    }

    /// Register or update a trusted domain
    pub fn trust_domain(
        &self,
        domain: &str,
        name: &str,
        trust_score: f64,
        category: Option<String>,
        is_official: bool,
    ) -> Result<TrustedSourceEntry> {
        self.registry
            .add_trusted(domain, name, trust_score, category, None, is_official)
    }

    /// Add a domain to the block list
    pub fn block_domain(
        &self,
        domain: &str,
        reason: &str,
        is_permanent: bool,
    ) -> Result<BlockedSourceEntry> {
        self.registry.block(domain, reason, None, is_permanent)
    }

    /// Lift a non-permanent block
    pub fn unblock_domain(&self, domain: &str) -> Result<BlockedSourceEntry> {
        self.registry.unblock(domain)
    }
}
