//! Fact-checking of numeric claims and citations
//!
//! Extracts a bounded set of claim fragments and citation URLs from an
//! item, probes citation reachability, and derives a pass/fail signal.
//! Probe failures are classified, never raised; a run with nothing to
//! check passes vacuously.

use futures::future;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use credence_common::{ContentItem, VerificationRecord, ISSUE_FAILED_FACT_CHECK};

use crate::config::{ExtractionLimits, ProbeSettings};
use crate::extract::{Claim, CitationExtractor, ClaimExtractor, Statistic};
use crate::probe::{CitationOutcome, CitationProber};

/// Minimum share of verified claims for a pass
pub const PASS_RATIO: f64 = 0.7;

/// Classified citation probe results for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationSummary {
    /// Reachable, non-error citations
    pub valid: Vec<CitationOutcome>,
    /// Citations answering with client/server errors
    pub invalid: Vec<CitationOutcome>,
    /// Transport-level failures
    pub errors: Vec<CitationOutcome>,
}

impl CitationSummary {
    /// Total citations actually probed
    pub fn total_checked(&self) -> usize {
        self.valid.len() + self.invalid.len() + self.errors.len()
    }
}

/// Result of one fact-check run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactCheckReport {
    /// A check ran (always true for produced reports)
    pub performed: bool,
    /// Pass/fail signal; vacuously true with zero claims
    pub passed: bool,
    /// Extracted claims + citations + statistics
    pub total_claims: u32,
    /// Citations that probed valid
    pub verified_claims: u32,
    /// verified / total, zero when nothing was extractable
    pub verification_rate: f64,
    /// Extracted claim fragments
    pub claims: Vec<Claim>,
    /// Extracted statistical data points
    pub statistics: Vec<Statistic>,
    /// Probed citations, classified
    pub citations: CitationSummary,
}

/// Fact checker over the extractor and prober seams
pub struct FactChecker {
    claims: Arc<dyn ClaimExtractor>,
    citations: Arc<dyn CitationExtractor>,
    prober: Arc<dyn CitationProber>,
    limits: ExtractionLimits,
    probe_settings: ProbeSettings,
}

impl FactChecker {
    /// Create a fact checker
    pub fn new(
        claims: Arc<dyn ClaimExtractor>,
        citations: Arc<dyn CitationExtractor>,
        prober: Arc<dyn CitationProber>,
        limits: ExtractionLimits,
        probe_settings: ProbeSettings,
    ) -> Self {
        Self {
            claims,
            citations,
            prober,
            limits,
            probe_settings,
        }
    }

    /// Fact-check an item and fold the outcome into a verification record
    #[instrument(skip(self, item, record), fields(item = %item.id))]
    pub async fn check(
        &self,
        item: &ContentItem,
        record: &mut VerificationRecord,
    ) -> FactCheckReport {
        let body = item.body();

        let claims = self.claims.claims(body, self.limits.max_claims);
        let statistics = self.claims.statistics(body, self.limits.max_statistics);
        let citation_urls = self.citations.citations(body, self.limits.max_citations);

        // Probe a bounded subset, concurrently, so one item can never
        // stall verification
        let probes = citation_urls
            .iter()
            .take(self.probe_settings.max_probes)
            .map(|url| self.prober.probe(url));
        let mut summary = CitationSummary::default();
        for outcome in future::join_all(probes).await {
            match outcome {
                CitationOutcome::Valid { .. } => summary.valid.push(outcome),
                CitationOutcome::Invalid { .. } => summary.invalid.push(outcome),
                CitationOutcome::Error { .. } => summary.errors.push(outcome),
            }
        }

        let total_claims = (claims.len() + citation_urls.len() + statistics.len()) as u32;
        let verified_claims = summary.valid.len() as u32;

        let (passed, verification_rate) = if total_claims > 0 {
            let rate = verified_claims as f64 / total_claims as f64;
            (rate >= PASS_RATIO, rate)
        } else {
            // Nothing extractable to dispute
            (true, 0.0)
        };

        debug!(
            total_claims,
            verified_claims, passed, "Fact-check completed"
        );

        let report = FactCheckReport {
            performed: true,
            passed,
            total_claims,
            verified_claims,
            verification_rate,
            claims,
            statistics,
            citations: summary,
        };

        record.fact_check_performed = true;
        record.fact_check_passed = Some(passed);
        record.verified_claims = verified_claims;
        record.total_claims = total_claims;
        if let Ok(value) = serde_json::to_value(&report) {
            record.metadata.insert("fact_check".to_string(), value);
        }

        report
    }

    /// Flag a record whose fact-check failed
    ///
    /// No-op when no check ran or the check passed.
    pub fn flag_unverified(&self, record: &mut VerificationRecord) {
        if !record.fact_check_performed || record.fact_check_passed != Some(false) {
            return;
        }
        record.add_issue(ISSUE_FAILED_FACT_CHECK);
        record.add_note(format!(
            "Fact-check failed: {}/{} claims verified",
            record.verified_claims, record.total_claims
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{PatternClaimExtractor, UrlCitationExtractor};
    use crate::probe::StaticProber;
    use uuid::Uuid;

    fn checker(prober: StaticProber) -> FactChecker {
        FactChecker::new(
            Arc::new(PatternClaimExtractor::new()),
            Arc::new(UrlCitationExtractor::new()),
            Arc::new(prober),
            ExtractionLimits::default(),
            ProbeSettings::default(),
        )
    }

    fn record() -> VerificationRecord {
        VerificationRecord::pending(Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_no_claims_passes_vacuously() {
        let checker = checker(StaticProber::offline());
        let item = ContentItem::new(Uuid::new_v4(), "plain prose without numbers or links");
        let mut rec = record();

        let report = checker.check(&item, &mut rec).await;

        assert!(report.performed);
        assert!(report.passed);
        assert_eq!(report.total_claims, 0);
        assert_eq!(rec.fact_check_passed, Some(true));
        assert_eq!(rec.total_claims, 0);
    }

    #[tokio::test]
    async fn test_reachable_citation_verifies() {
        let checker = checker(StaticProber::new(vec!["https://example.com".to_string()]));
        let item = ContentItem::new(
            Uuid::new_v4(),
            "According to https://example.com the data shows growth.",
        );
        let mut rec = record();

        let report = checker.check(&item, &mut rec).await;

        assert_eq!(report.citations.valid.len(), 1);
        assert_eq!(report.verified_claims, 1);
        assert_eq!(report.total_claims, 1);
        assert!(report.passed);
    }

    #[tokio::test]
    async fn test_unreachable_citations_fail_check() {
        let checker = checker(StaticProber::offline());
        let item = ContentItem::new(
            Uuid::new_v4(),
            "Growth of 15% was reported at https://dead-link.example/a and https://dead-link.example/b",
        );
        let mut rec = record();

        let report = checker.check(&item, &mut rec).await;

        assert!(!report.passed);
        assert!(report.citations.errors.len() == 2);
        assert_eq!(report.verified_claims, 0);
        assert!(report.total_claims >= 3);
    }

    #[tokio::test]
    async fn test_flag_unverified_appends_once() {
        let checker = checker(StaticProber::offline());
        let item = ContentItem::new(Uuid::new_v4(), "Revenue rose 20% per https://gone.example");
        let mut rec = record();

        checker.check(&item, &mut rec).await;
        checker.flag_unverified(&mut rec);
        checker.flag_unverified(&mut rec);

        assert_eq!(
            rec.issues_found
                .iter()
                .filter(|i| i.as_str() == ISSUE_FAILED_FACT_CHECK)
                .count(),
            1
        );
        assert!(rec.notes.unwrap().contains("claims verified"));
    }

    #[tokio::test]
    async fn test_flag_noop_when_passed() {
        let checker = checker(StaticProber::offline());
        let mut rec = record();
        rec.fact_check_performed = true;
        rec.fact_check_passed = Some(true);

        checker.flag_unverified(&mut rec);
        assert!(rec.issues_found.is_empty());
    }

    #[tokio::test]
    async fn test_probe_cap_bounds_work() {
        let reachable: Vec<String> = (0..30).map(|i| format!("https://s{i}.example")).collect();
        let text: String = reachable
            .iter()
            .map(|u| format!("{u} "))
            .collect();
        let checker = checker(StaticProber::new(reachable));
        let item = ContentItem::new(Uuid::new_v4(), text);
        let mut rec = record();

        let report = checker.check(&item, &mut rec).await;
        // 30 citations extracted, only the configured cap probed
        assert_eq!(report.citations.total_checked(), 20);
    }
}
