//! Source reliability assessment
//!
//! Scores one source from four independent signals: domain reputation,
//! historical success rate, fetch recency, and a content-quality proxy.
//! Assessment is pure: it returns an immutable [`VerificationRecord`] and
//! never mutates the source; persisting the score is the orchestrator's
//! job, through the store's version-checked write.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

use credence_common::{
    ReliabilityRating, Source, SourceType, VerificationRecord, VerificationStatus,
    ISSUE_BLOCKED_SOURCE,
};

use crate::config::ScoreWeights;
use crate::registry::TrustRegistry;

/// One ordered domain-reputation rule: if any needle occurs in the
/// domain string, the rule's score applies. First match wins.
#[derive(Debug, Clone)]
pub struct DomainRule {
    /// Rule label, recorded in assessment metadata
    pub name: &'static str,
    /// Substrings that trigger the rule
    pub needles: &'static [&'static str],
    /// Domain-trust score in [0, 1]
    pub score: f64,
}

/// Default ordered rule table for domains absent from the trust registry
pub fn default_domain_rules() -> Vec<DomainRule> {
    vec![
        DomainRule {
            name: "government",
            needles: &[".gov", ".mil", "government"],
            score: 0.95,
        },
        DomainRule {
            name: "educational",
            needles: &[".edu", ".ac.", "university", "institute"],
            score: 0.85,
        },
        DomainRule {
            name: "research",
            needles: &["research", "scholar", "science", "academic"],
            score: 0.80,
        },
        DomainRule {
            name: "news",
            needles: &["news", "reuters", "times", "herald", "tribune"],
            score: 0.60,
        },
    ]
}

/// Assesses source trustworthiness against the registry and rule table
pub struct ReliabilityAssessor {
    registry: Arc<TrustRegistry>,
    weights: ScoreWeights,
    domain_rules: Vec<DomainRule>,
}

impl ReliabilityAssessor {
    /// Create an assessor with the default rule table
    pub fn new(registry: Arc<TrustRegistry>, weights: ScoreWeights) -> Self {
        Self {
            registry,
            weights,
            domain_rules: default_domain_rules(),
        }
    }

    /// Replace the domain rule table
    pub fn with_domain_rules(mut self, rules: Vec<DomainRule>) -> Self {
        self.domain_rules = rules;
        self
    }

    /// Assess a source, producing one immutable verification record
    #[instrument(skip(self, source), fields(source = %source.name))]
    pub fn assess(&self, source: &Source) -> VerificationRecord {
        // Deny overrides everything: a blocked domain short-circuits
        if let Some(domain) = source.domain() {
            if let Some(blocked) = self.registry.blocked(&domain) {
                return self.blocked_record(source, &blocked.reason);
            }
        }

        let domain_trust = self.domain_trust_score(source);
        let success_rate = source.success_rate.clamp(0.0, 1.0);
        let freshness = fetch_recency_score(
            source
                .last_successful_fetch
                .map(|at| (Utc::now() - at).num_days()),
        );
        let content_quality = content_quality_score(source.source_type);

        // Four of the five configured weights apply; the reserved
        // cross-validation weight (0.05) is intentionally left out, so the
        // composite tops out at 0.95. A known discrepancy, kept as-is.
        let score = domain_trust * self.weights.domain_trust
            + success_rate * self.weights.success_rate
            + freshness * self.weights.freshness
            + content_quality * self.weights.content_quality;

        let status = VerificationStatus::from_score(score);
        let now = Utc::now();

        let mut record = VerificationRecord::pending(source.id);
        record.status = status;
        record.reliability_rating = Some(ReliabilityRating::from_score(score));
        record.reliability_score = Some(score);
        record.trustworthiness_score = Some(domain_trust);
        record.content_quality_score = Some(content_quality);
        record.last_update_check = Some(now);
        record.verified_at = (status == VerificationStatus::Verified).then_some(now);
        record.metadata.insert(
            "sub_scores".to_string(),
            json!({
                "domain_trust": domain_trust,
                "success_rate": success_rate,
                "freshness": freshness,
                "content_quality": content_quality,
            }),
        );

        debug!(
            score,
            domain_trust, success_rate, freshness, content_quality,
            "Source assessed"
        );
        record
    }

    /// Verification record for a blocked source
    fn blocked_record(&self, source: &Source, reason: &str) -> VerificationRecord {
        let mut record = VerificationRecord::pending(source.id);
        record.status = VerificationStatus::Failed;
        record.reliability_rating = Some(ReliabilityRating::Unreliable);
        record.reliability_score = Some(0.0);
        record.trustworthiness_score = Some(0.0);
        record.last_update_check = Some(Utc::now());
        record.add_issue(ISSUE_BLOCKED_SOURCE);
        record.add_note(format!("Source is in block list: {reason}"));
        record
    }

    /// Domain-trust sub-score: registry entry wins, then the ordered rule
    /// table, then neutral 0.5
    fn domain_trust_score(&self, source: &Source) -> f64 {
        let Some(domain) = source.domain() else {
            return 0.5;
        };
        if let Some(trusted) = self.registry.trusted(&domain) {
            return trusted.trust_score;
        }
        for rule in &self.domain_rules {
            if rule.needles.iter().any(|needle| domain.contains(needle)) {
                return rule.score;
            }
        }
        0.5
    }
}

/// Step function of days since the last successful fetch
///
/// `None` means the source has never been fetched; scored neutral.
pub fn fetch_recency_score(days_since_fetch: Option<i64>) -> f64 {
    let Some(days) = days_since_fetch else {
        return 0.5;
    };
    match days {
        d if d <= 1 => 1.0,
        d if d <= 7 => 0.9,
        d if d <= 30 => 0.7,
        d if d <= 90 => 0.5,
        d if d <= 180 => 0.3,
        _ => 0.1,
    }
}

/// Content-quality proxy by collection mechanism; structured feeds score
/// above generic scraped pages
pub fn content_quality_score(source_type: SourceType) -> f64 {
    match source_type {
        SourceType::Government => 0.9,
        SourceType::Api => 0.85,
        SourceType::Database => 0.8,
        SourceType::News => 0.6,
        SourceType::WebScraping => 0.5,
        SourceType::SocialMedia => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn assessor() -> (Arc<TrustRegistry>, ReliabilityAssessor) {
        let registry = Arc::new(TrustRegistry::new());
        let assessor = ReliabilityAssessor::new(registry.clone(), ScoreWeights::default());
        (registry, assessor)
    }

    #[test]
    fn test_government_source_scores_verified() {
        let (_registry, assessor) = assessor();
        let source = Source::new("Census Bureau", SourceType::Government)
            .with_url("https://data.census.gov/reports")
            .with_category("government")
            .with_success_rate(0.95);

        let record = assessor.assess(&source);
        let score = record.reliability_score.unwrap();

        // domain 0.95*0.35 + success 0.95*0.25 + never-fetched 0.5*0.20 + quality 0.9*0.15
        assert!(score >= 0.7, "expected good/excellent band, got {score}");
        assert_eq!(record.status, VerificationStatus::Verified);
        assert!(record.verified_at.is_some());
    }

    #[test]
    fn test_blocked_source_short_circuits() {
        let (registry, assessor) = assessor();
        registry
            .block("fake-news.com", "fabricated statistics", None, false)
            .unwrap();

        let source = Source::new("Fake News", SourceType::WebScraping)
            .with_url("https://fake-news.com/article")
            .with_success_rate(1.0);

        let record = assessor.assess(&source);
        assert_eq!(record.status, VerificationStatus::Failed);
        assert_eq!(record.reliability_rating, Some(ReliabilityRating::Unreliable));
        assert_eq!(record.reliability_score, Some(0.0));
        assert_eq!(record.trustworthiness_score, Some(0.0));
        assert!(record.issues_found.contains(&ISSUE_BLOCKED_SOURCE.to_string()));
        assert!(record.notes.unwrap().contains("fabricated statistics"));
    }

    #[test]
    fn test_registry_entry_overrides_rules() {
        let (registry, assessor) = assessor();
        registry
            .add_trusted("blog.example.com", "Example Blog", 0.98, None, None, false)
            .unwrap();

        let source = Source::new("Blog", SourceType::WebScraping)
            .with_url("https://blog.example.com/post");
        let record = assessor.assess(&source);
        assert!((record.trustworthiness_score.unwrap() - 0.98).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_domain_neutral() {
        let (_registry, assessor) = assessor();
        let source = Source::new("Somewhere", SourceType::WebScraping)
            .with_url("https://random-site.example");
        let record = assessor.assess(&source);
        assert!((record.trustworthiness_score.unwrap() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_url_neutral_domain_trust() {
        let (_registry, assessor) = assessor();
        let source = Source::new("No URL", SourceType::Database);
        let record = assessor.assess(&source);
        assert!((record.trustworthiness_score.unwrap() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fetch_recency_steps() {
        assert!((fetch_recency_score(None) - 0.5).abs() < f64::EPSILON);
        assert!((fetch_recency_score(Some(0)) - 1.0).abs() < f64::EPSILON);
        assert!((fetch_recency_score(Some(1)) - 1.0).abs() < f64::EPSILON);
        assert!((fetch_recency_score(Some(7)) - 0.9).abs() < f64::EPSILON);
        assert!((fetch_recency_score(Some(30)) - 0.7).abs() < f64::EPSILON);
        assert!((fetch_recency_score(Some(90)) - 0.5).abs() < f64::EPSILON);
        assert!((fetch_recency_score(Some(180)) - 0.3).abs() < f64::EPSILON);
        assert!((fetch_recency_score(Some(400)) - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_assessment_is_idempotent() {
        let (_registry, assessor) = assessor();
        let source = Source::new("Stable", SourceType::Api)
            .with_url("https://api.example.com")
            .with_success_rate(0.8)
            .with_last_successful_fetch(Utc::now() - Duration::days(3));

        let first = assessor.assess(&source).reliability_score.unwrap();
        let second = assessor.assess(&source).reliability_score.unwrap();
        assert!((first - second).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let (_registry, assessor) = assessor();
        let source = Source::new("Max", SourceType::Government)
            .with_url("https://stats.gov")
            .with_success_rate(1.0)
            .with_last_successful_fetch(Utc::now());
        let score = assessor.assess(&source).reliability_score.unwrap();
        // Composite tops out at 0.95 because the reserved weight is unapplied
        assert!(score <= 0.95 + 1e-9);
        assert!(score >= 0.0);
    }
}
