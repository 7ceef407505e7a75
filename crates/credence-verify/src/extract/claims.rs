//! Numeric claim and statistic extraction
//!
//! A fixed pattern table picks out percentage, monetary, and year-anchored
//! assertions. Explicitly simplistic: these fragments feed the fact-check
//! pass/fail ratio, nothing semantic happens with them.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ClaimExtractor;

/// Kind of extracted claim fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Percentage,
    Monetary,
    YearAnchored,
}

/// One extracted numeric claim fragment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub kind: ClaimKind,
    /// Matched text fragment
    pub text: String,
    /// Byte offset of the match in the content body
    pub position: usize,
}

/// One extracted statistical data point with its captured groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistic {
    pub kind: ClaimKind,
    pub text: String,
    /// Captured subgroups, e.g. subject and value
    pub groups: Vec<String>,
}

/// Pattern-table claim extractor
pub struct PatternClaimExtractor {
    claim_patterns: Vec<(ClaimKind, Regex)>,
    stat_patterns: Vec<(ClaimKind, Regex)>,
}

impl PatternClaimExtractor {
    /// Compile the pattern tables
    pub fn new() -> Self {
        let claim_patterns = vec![
            (
                ClaimKind::Percentage,
                Regex::new(r"(?i)\b\d+(?:[.,]\d+)?\s*(?:%|percent(?:age points?)?)")
                    .expect("static pattern"),
            ),
            (
                ClaimKind::Monetary,
                Regex::new(
                    r"(?i)(?:[$€£]\s?\d+(?:[.,]\d+)?|\b\d+(?:[.,]\d+)?\s*(?:thousand|million|billion|trillion)\b(?:\s*(?:dollars|euros|pounds))?)",
                )
                .expect("static pattern"),
            ),
            (
                ClaimKind::YearAnchored,
                Regex::new(
                    r"(?i)\b(?:rose|fell|grew|increased|decreased|reached|totaled|declined)\s+(?:by\s+)?\d+(?:[.,]\d+)?|\bin\s+(?:19|20)\d{2}\b",
                )
                .expect("static pattern"),
            ),
        ];

        let stat_patterns = vec![
            // "inflation reached 4.2%" / "unemployment was 7%"
            (
                ClaimKind::Percentage,
                Regex::new(
                    r"(?i)\b(\w+(?:\s+\w+)?)\s+(?:is|was|reached|totaled|stands at|hit)\s+(\d+(?:[.,]\d+)?)\s*%",
                )
                .expect("static pattern"),
            ),
            // "$5.5 billion" / "12 million euros"
            (
                ClaimKind::Monetary,
                Regex::new(
                    r"(?i)\b(\d+(?:[.,]\d+)?)\s*(thousand|million|billion|trillion)\s*(dollars|euros|pounds)?",
                )
                .expect("static pattern"),
            ),
            // "in 2024, revenue reached 300"
            (
                ClaimKind::YearAnchored,
                Regex::new(
                    r"(?i)\bin\s+((?:19|20)\d{2}),?\s+(\w+)\s+(?:reached|totaled|was|hit)\s+(\d+(?:[.,]\d+)?)",
                )
                .expect("static pattern"),
            ),
        ];

        Self {
            claim_patterns,
            stat_patterns,
        }
    }
}

impl Default for PatternClaimExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimExtractor for PatternClaimExtractor {
    fn claims(&self, text: &str, limit: usize) -> Vec<Claim> {
        if text.is_empty() {
            return Vec::new();
        }
        let mut claims = Vec::new();
        for (kind, pattern) in &self.claim_patterns {
            for m in pattern.find_iter(text) {
                claims.push(Claim {
                    kind: *kind,
                    text: m.as_str().to_string(),
                    position: m.start(),
                });
                if claims.len() >= limit {
                    return claims;
                }
            }
        }
        claims
    }

    fn statistics(&self, text: &str, limit: usize) -> Vec<Statistic> {
        if text.is_empty() {
            return Vec::new();
        }
        let mut stats = Vec::new();
        for (kind, pattern) in &self.stat_patterns {
            for caps in pattern.captures_iter(text) {
                let full = caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
                let groups = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str().to_string())
                    .collect();
                stats.push(Statistic {
                    kind: *kind,
                    text: full,
                    groups,
                });
                if stats.len() >= limit {
                    return stats;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_claims() {
        let ex = PatternClaimExtractor::new();
        let claims = ex.claims("The market grew by 15% while costs rose 3.2 percent", 20);
        assert!(claims.iter().filter(|c| c.kind == ClaimKind::Percentage).count() >= 2);
    }

    #[test]
    fn test_monetary_claims() {
        let ex = PatternClaimExtractor::new();
        let claims = ex.claims("Revenue hit $4.5 billion, up from 3 billion euros", 20);
        assert!(claims.iter().any(|c| c.kind == ClaimKind::Monetary));
    }

    #[test]
    fn test_year_anchored_claims() {
        let ex = PatternClaimExtractor::new();
        let claims = ex.claims("In 2024 the sector expanded", 20);
        assert!(claims.iter().any(|c| c.kind == ClaimKind::YearAnchored));
    }

    #[test]
    fn test_claim_limit_enforced() {
        let ex = PatternClaimExtractor::new();
        let text: String = (0..100).map(|i| format!("{}% ", i)).collect();
        let claims = ex.claims(&text, 20);
        assert_eq!(claims.len(), 20);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let ex = PatternClaimExtractor::new();
        assert!(ex.claims("", 20).is_empty());
        assert!(ex.statistics("", 30).is_empty());
    }

    #[test]
    fn test_statistics_capture_groups() {
        let ex = PatternClaimExtractor::new();
        let stats = ex.statistics("Unemployment reached 7.2% last quarter", 30);
        assert!(!stats.is_empty());
        assert!(stats[0].groups.iter().any(|g| g.contains("7.2")));
    }
}
