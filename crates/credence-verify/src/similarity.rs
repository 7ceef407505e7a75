//! Text similarity and bounded difference extraction
//!
//! Generic diff-ratio comparison between two content bodies. The ratio is
//! a character-level sequence-match measure in [0, 1]; difference lines
//! are capped so validation records stay bounded regardless of input size.

use similar::{ChangeTag, TextDiff};

/// Outcome of comparing two content bodies
#[derive(Debug, Clone)]
pub struct ContentComparison {
    /// Similarity ratio in [0, 1]
    pub similarity: f64,
    /// Whether the ratio met the threshold
    pub is_matching: bool,
    /// Difference lines for non-matching pairs, capped
    pub differences: Vec<String>,
}

/// Character-level similarity ratio between two strings
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    TextDiff::from_chars(a, b).ratio() as f64
}

/// Compare two content bodies against a similarity threshold
///
/// Non-matching pairs get up to `max_differences` added/removed lines
/// recorded, prefixed `+`/`-` in unified-diff style.
pub fn compare_content(a: &str, b: &str, threshold: f64, max_differences: usize) -> ContentComparison {
    if a.is_empty() || b.is_empty() {
        return ContentComparison {
            similarity: 0.0,
            is_matching: false,
            differences: vec!["One or both contents are empty".to_string()],
        };
    }

    let similarity = similarity_ratio(a, b);
    let is_matching = similarity >= threshold;

    let mut differences = Vec::new();
    if !is_matching {
        let diff = TextDiff::from_lines(a, b);
        for change in diff.iter_all_changes() {
            let prefix = match change.tag() {
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
                ChangeTag::Equal => continue,
            };
            differences.push(format!("{}{}", prefix, change.value().trim_end()));
            if differences.len() >= max_differences {
                break;
            }
        }
    }

    ContentComparison {
        similarity,
        is_matching,
        differences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_content_ratio_is_one() {
        let ratio = similarity_ratio("the market grew by 15%", "the market grew by 15%");
        assert!((ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_content_ratio_is_low() {
        let ratio = similarity_ratio("aaaaaaaaaa", "zzzzzzzzzz");
        assert!(ratio < 0.2);
    }

    #[test]
    fn test_empty_content_never_matches() {
        let cmp = compare_content("", "something", 0.1, 50);
        assert!(!cmp.is_matching);
        assert!((cmp.similarity).abs() < f64::EPSILON);
        assert_eq!(cmp.differences.len(), 1);
    }

    #[test]
    fn test_similar_content_matches() {
        let cmp = compare_content(
            "The market grew by 15% in 2024",
            "The market grew by 15% in 2024.",
            0.7,
            50,
        );
        assert!(cmp.is_matching);
        assert!(cmp.differences.is_empty());
    }

    #[test]
    fn test_differences_are_capped() {
        let a: String = (0..200).map(|i| format!("line a {}\n", i)).collect();
        let b: String = (0..200).map(|i| format!("row b {}\n", i)).collect();
        let cmp = compare_content(&a, &b, 0.95, 50);
        assert!(!cmp.is_matching);
        assert_eq!(cmp.differences.len(), 50);
    }

    #[test]
    fn test_ratio_is_symmetricish_bounds() {
        let r = similarity_ratio("abc def", "abd cef");
        assert!((0.0..=1.0).contains(&r));
    }
}
