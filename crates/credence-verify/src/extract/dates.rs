//! Date extraction from text content
//!
//! Supports ISO `YYYY-MM-DD`, dotted `DD.MM.YYYY`, and named-month
//! (`March 5, 2024` / `5 March 2024`) formats. First recognizable match
//! wins, mirroring how publication dates usually lead an article.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use super::DateExtractor;

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Pattern-table date extractor
pub struct RegexDateExtractor {
    iso: Regex,
    dotted: Regex,
    month_first: Regex,
    day_first: Regex,
}

impl RegexDateExtractor {
    /// Compile the pattern table
    pub fn new() -> Self {
        let month_alt = MONTHS.join("|");
        Self {
            iso: Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("static pattern"),
            dotted: Regex::new(r"\b(\d{2})\.(\d{2})\.(\d{4})\b").expect("static pattern"),
            month_first: Regex::new(&format!(
                r"(?i)\b({month_alt})\s+(\d{{1,2}}),?\s+(\d{{4}})\b"
            ))
            .expect("static pattern"),
            day_first: Regex::new(&format!(
                r"(?i)\b(\d{{1,2}})\s+({month_alt})\s+(\d{{4}})\b"
            ))
            .expect("static pattern"),
        }
    }

    fn month_number(name: &str) -> Option<u32> {
        let name = name.to_ascii_lowercase();
        MONTHS.iter().position(|m| *m == name).map(|i| i as u32 + 1)
    }
}

impl Default for RegexDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn to_utc(date: NaiveDate) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(date.and_hms_opt(0, 0, 0).expect("midnight"), Utc)
}

impl DateExtractor for RegexDateExtractor {
    fn parse(&self, value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        // Full timestamps first, then date-only forms, then text patterns
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Some(to_utc(date));
        }
        self.extract(value)
    }

    fn extract(&self, text: &str) -> Option<DateTime<Utc>> {
        if text.is_empty() {
            return None;
        }

        if let Some(caps) = self.iso.captures(text) {
            let (y, m, d) = (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?);
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return Some(to_utc(date));
            }
        }
        if let Some(caps) = self.dotted.captures(text) {
            let (d, m, y) = (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?);
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return Some(to_utc(date));
            }
        }
        if let Some(caps) = self.month_first.captures(text) {
            let m = Self::month_number(&caps[1])?;
            let (d, y) = (caps[2].parse().ok()?, caps[3].parse().ok()?);
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return Some(to_utc(date));
            }
        }
        if let Some(caps) = self.day_first.captures(text) {
            let d = caps[1].parse().ok()?;
            let m = Self::month_number(&caps[2])?;
            let y = caps[3].parse().ok()?;
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return Some(to_utc(date));
            }
        }
        None
    }
}
