//! Trust/block registry entries
//!
//! Explicit allow-list and deny-list entries for source domains. A domain
//! present in the block list always overrides its trusted entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Allow-list entry for a domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustedSourceEntry {
    /// Unique identifier
    pub id: Uuid,

    /// Domain name, unique within the trusted list
    pub domain: String,

    /// Display name of the organization behind the domain
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Category, e.g. "government", "academic", "news"
    pub category: Option<String>,

    /// Trust score in [0, 1] used instead of heuristic domain scoring
    pub trust_score: f64,

    /// Whether this is an official government/organization source
    pub is_official: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl TrustedSourceEntry {
    /// Create a new entry with full trust
    pub fn new(domain: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            domain: domain.into(),
            name: name.into(),
            description: None,
            category: None,
            trust_score: 1.0,
            is_official: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Deny-list entry for a domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedSourceEntry {
    /// Unique identifier
    pub id: Uuid,

    /// Domain name, unique within the blocked list
    pub domain: String,

    /// Why the domain was blocked
    pub reason: String,

    /// Who issued the block
    pub blocked_by: Option<String>,

    /// Permanent blocks cannot be lifted through `unblock`
    pub is_permanent: bool,

    /// When a temporary block is scheduled to expire
    pub unblock_date: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl BlockedSourceEntry {
    /// Create a new non-permanent block
    pub fn new(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            domain: domain.into(),
            reason: reason.into(),
            blocked_by: None,
            is_permanent: false,
            unblock_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}
