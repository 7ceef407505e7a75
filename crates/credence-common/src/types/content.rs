//! ContentItem - one collected piece of content
//!
//! Items are created by the acquisition layer and immutable afterwards;
//! the verification core only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Wire/file format the content arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFormat {
    Html,
    Json,
    Xml,
    Text,
    Csv,
    Pdf,
}

/// One collected content item belonging to exactly one source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique identifier
    pub id: Uuid,

    /// Owning source
    pub source_id: Uuid,

    /// Grouping key, e.g. the research session this item was gathered for.
    /// Sibling items for cross-validation share this key.
    pub session_id: Option<Uuid>,

    /// Optional title
    pub title: Option<String>,

    /// Content as collected
    pub raw_content: String,

    /// Cleaned/normalized content, when processing has run
    pub processed_content: Option<String>,

    /// Format of the raw content
    pub format: ContentFormat,

    /// URL this item was fetched from
    pub source_url: Option<String>,

    /// When the item was collected
    pub collected_date: DateTime<Utc>,

    /// Claimed publication date of the content itself (distinct from
    /// the collection date)
    pub content_date: Option<DateTime<Utc>>,

    /// Structured metadata from the acquisition layer; freshness checks
    /// consult `publication_date` / `date` keys here
    pub metadata: Map<String, Value>,

    /// Raw content size, when known
    pub size_bytes: Option<u64>,
}

impl ContentItem {
    /// Create a plain-text item
    pub fn new(source_id: Uuid, raw_content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id,
            session_id: None,
            title: None,
            raw_content: raw_content.into(),
            processed_content: None,
            format: ContentFormat::Text,
            source_url: None,
            collected_date: Utc::now(),
            content_date: None,
            metadata: Map::new(),
            size_bytes: None,
        }
    }

    /// Set the grouping key
    pub fn with_session(mut self, session_id: Uuid) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Set the processed content
    pub fn with_processed(mut self, content: impl Into<String>) -> Self {
        self.processed_content = Some(content.into());
        self
    }

    /// Set the claimed publication date
    pub fn with_content_date(mut self, date: DateTime<Utc>) -> Self {
        self.content_date = Some(date);
        self
    }

    /// Set a metadata key
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The content body to analyze: processed when available, raw otherwise
    pub fn body(&self) -> &str {
        self.processed_content.as_deref().unwrap_or(&self.raw_content)
    }
}
