//! Citation URL extraction

use regex::Regex;
use std::collections::HashSet;

use super::CitationExtractor;

/// Extracts http(s) URLs, deduplicated in order of first appearance
pub struct UrlCitationExtractor {
    url: Regex,
}

impl UrlCitationExtractor {
    /// Compile the URL pattern
    pub fn new() -> Self {
        Self {
            url: Regex::new(r#"https?://[^\s<>"{}|\\^`\[\]]+"#).expect("static pattern"),
        }
    }
}

impl Default for UrlCitationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CitationExtractor for UrlCitationExtractor {
    fn citations(&self, text: &str, limit: usize) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let mut seen = HashSet::new();
        let mut urls = Vec::new();
        for m in self.url.find_iter(text) {
            // Trailing sentence punctuation is not part of the URL
            let url = m.as_str().trim_end_matches(['.', ',', ';', ')']);
            if seen.insert(url.to_string()) {
                urls.push(url.to_string());
                if urls.len() >= limit {
                    break;
                }
            }
        }
        urls
    }
}
