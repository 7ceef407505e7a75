//! Verification engine configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level configuration for the verification engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Reliability score weights
    pub weights: ScoreWeights,
    /// Cross-validation settings
    pub cross_validation: CrossValidationSettings,
    /// Freshness thresholds in days, by content category
    pub freshness_thresholds: HashMap<String, i64>,
    /// Citation probing settings
    pub probe: ProbeSettings,
    /// Extraction caps
    pub limits: ExtractionLimits,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            cross_validation: CrossValidationSettings::default(),
            freshness_thresholds: default_freshness_thresholds(),
            probe: ProbeSettings::default(),
            limits: ExtractionLimits::default(),
        }
    }
}

impl VerifyConfig {
    /// Load configuration from environment variables over defaults
    pub fn load() -> Result<Self> {
        // Pick up a .env file when present
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(val) = std::env::var("CREDENCE_SIMILARITY_THRESHOLD") {
            if let Ok(v) = val.parse() {
                cfg.cross_validation.similarity_threshold = v;
            }
        }
        if let Ok(val) = std::env::var("CREDENCE_PROBE_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                cfg.probe.timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("CREDENCE_PROBE_LIMIT") {
            if let Ok(v) = val.parse() {
                cfg.probe.max_probes = v;
            }
        }
        if let Ok(val) = std::env::var("CREDENCE_SIBLING_LIMIT") {
            if let Ok(v) = val.parse() {
                cfg.cross_validation.sibling_limit = v;
            }
        }

        Ok(cfg)
    }

    /// Freshness threshold for a category, resolving unknown categories
    /// to the general default
    pub fn freshness_threshold(&self, category: &str) -> i64 {
        self.freshness_thresholds
            .get(category)
            .copied()
            .unwrap_or(crate::DEFAULT_FRESHNESS_THRESHOLD_DAYS)
    }

    /// Set a freshness threshold for a category
    pub fn set_freshness_threshold(&mut self, category: impl Into<String>, days: i64) {
        self.freshness_thresholds.insert(category.into(), days);
    }
}

/// Weight factors for the reliability score
///
/// The four applied weights sum to 0.95. The fifth, `cross_validation`,
/// is reserved but not folded into source assessment; the 0.95 ceiling is
/// a known discrepancy awaiting a product decision and must not be
/// silently renormalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Trust based on domain reputation
    pub domain_trust: f64,
    /// Historical fetch success rate
    pub success_rate: f64,
    /// How recently the source was fetched
    pub freshness: f64,
    /// Proxy content-quality score
    pub content_quality: f64,
    /// Reserved; not applied during source assessment
    pub cross_validation: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            domain_trust: 0.35,
            success_rate: 0.25,
            freshness: 0.20,
            content_quality: 0.15,
            cross_validation: 0.05,
        }
    }
}

/// Cross-validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossValidationSettings {
    /// Minimum similarity ratio for a pair to count as matching
    pub similarity_threshold: f64,
    /// Maximum sibling items gathered per validation
    pub sibling_limit: usize,
    /// Maximum difference lines recorded per non-matching pair
    pub max_differences: usize,
}

impl Default for CrossValidationSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: crate::DEFAULT_SIMILARITY_THRESHOLD,
            sibling_limit: crate::DEFAULT_SIBLING_LIMIT,
            max_differences: crate::MAX_RECORDED_DIFFERENCES,
        }
    }
}

/// Citation probing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Per-probe timeout in seconds
    pub timeout_secs: u64,
    /// Maximum citations probed per fact-check call
    pub max_probes: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_secs: crate::DEFAULT_PROBE_TIMEOUT_SECS,
            max_probes: crate::CITATION_PROBE_LIMIT,
        }
    }
}

/// Caps on extracted artifacts, bounding record sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionLimits {
    /// Maximum numeric claims extracted per item
    pub max_claims: usize,
    /// Maximum statistics extracted per item
    pub max_statistics: usize,
    /// Maximum unique citation URLs extracted per item
    pub max_citations: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_claims: crate::CLAIM_EXTRACTION_LIMIT,
            max_statistics: crate::STATISTIC_EXTRACTION_LIMIT,
            max_citations: crate::CITATION_EXTRACTION_LIMIT,
        }
    }
}

fn default_freshness_thresholds() -> HashMap<String, i64> {
    HashMap::from([
        ("market_data".to_string(), 30),
        ("news".to_string(), 90),
        ("statistics".to_string(), 365),
        ("research".to_string(), 730),
        ("general".to_string(), 180),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum() {
        let w = ScoreWeights::default();
        let applied = w.domain_trust + w.success_rate + w.freshness + w.content_quality;
        // Applied weights deliberately sum to 0.95; see struct docs
        assert!((applied - 0.95).abs() < 1e-9);
        assert!((applied + w.cross_validation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_category_falls_back_to_general() {
        let cfg = VerifyConfig::default();
        assert_eq!(cfg.freshness_threshold("astrology"), 180);
        assert_eq!(cfg.freshness_threshold("news"), 90);
    }

    #[test]
    fn test_set_threshold() {
        let mut cfg = VerifyConfig::default();
        cfg.set_freshness_threshold("weather", 2);
        assert_eq!(cfg.freshness_threshold("weather"), 2);
    }
}
