//! Trust/block domain registry
//!
//! Explicit allow-list and deny-list with deny-overrides-allow semantics.
//! Blocking a domain never removes its trusted entry; lookups always
//! consult the block list first.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::info;

use credence_common::{
    BlockedSourceEntry, CredenceError, RegistryError, Result, TrustedSourceEntry,
};

/// Concurrent registry of trusted and blocked domains
///
/// Reads may run concurrently with writes; a block takes effect for
/// assessments issued after it commits, not those already in flight.
pub struct TrustRegistry {
    trusted: DashMap<String, TrustedSourceEntry>,
    blocked: DashMap<String, BlockedSourceEntry>,
}

impl TrustRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            trusted: DashMap::new(),
            blocked: DashMap::new(),
        }
    }

    /// Add or update a trusted domain
    ///
    /// Re-adding an existing domain updates the entry in place; domain
    /// uniqueness is enforced by the map key.
    #[allow(clippy::too_many_arguments)]
    pub fn add_trusted(
        &self,
        domain: &str,
        name: &str,
        trust_score: f64,
        category: Option<String>,
        description: Option<String>,
        is_official: bool,
    ) -> Result<TrustedSourceEntry> {
        let domain = normalize_domain(domain)?;
        if !(0.0..=1.0).contains(&trust_score) {
            return Err(RegistryError::TrustScoreOutOfRange(trust_score).into());
        }

        let mut entry = TrustedSourceEntry::new(domain.clone(), name);
        entry.trust_score = trust_score;
        entry.category = category;
        entry.description = description;
        entry.is_official = is_official;

        // Upsert: keep the original id and creation time when updating
        if let Some(existing) = self.trusted.get(&domain) {
            entry.id = existing.id;
            entry.created_at = existing.created_at;
            entry.updated_at = Utc::now();
        }
        self.trusted.insert(domain.clone(), entry.clone());

        info!(domain = %domain, trust_score, "Trusted source registered");
        Ok(entry)
    }

    /// Add a domain to the block list
    ///
    /// The trusted entry for the same domain, if any, is retained; block
    /// lookups take precedence regardless.
    pub fn block(
        &self,
        domain: &str,
        reason: &str,
        blocked_by: Option<String>,
        is_permanent: bool,
    ) -> Result<BlockedSourceEntry> {
        let domain = normalize_domain(domain)?;

        let mut entry = BlockedSourceEntry::new(domain.clone(), reason);
        entry.blocked_by = blocked_by;
        entry.is_permanent = is_permanent;

        if let Some(existing) = self.blocked.get(&domain) {
            entry.id = existing.id;
            entry.created_at = existing.created_at;
            entry.updated_at = Utc::now();
        }
        self.blocked.insert(domain.clone(), entry.clone());

        info!(domain = %domain, reason = %entry.reason, permanent = is_permanent, "Source blocked");
        Ok(entry)
    }

    /// Lift a non-permanent block
    pub fn unblock(&self, domain: &str) -> Result<BlockedSourceEntry> {
        let domain = normalize_domain(domain)?;
        let entry = self
            .blocked
            .get(&domain)
            .ok_or(RegistryError::NotBlocked(domain.clone()))?
            .clone();
        if entry.is_permanent {
            return Err(RegistryError::PermanentBlock(domain).into());
        }
        self.blocked.remove(&domain);
        info!(domain = %domain, "Source unblocked");
        Ok(entry)
    }

    /// Look up the block entry for a domain; deny overrides allow, so
    /// callers must check this before [`TrustRegistry::trusted`]
    pub fn blocked(&self, domain: &str) -> Option<BlockedSourceEntry> {
        let domain = domain.trim().to_ascii_lowercase();
        self.blocked.get(&domain).map(|e| e.clone())
    }

    /// Look up the trusted entry for a domain
    pub fn trusted(&self, domain: &str) -> Option<TrustedSourceEntry> {
        let domain = domain.trim().to_ascii_lowercase();
        self.trusted.get(&domain).map(|e| e.clone())
    }

    /// Whether a domain is currently blocked
    pub fn is_blocked(&self, domain: &str) -> bool {
        self.blocked(domain).is_some()
    }

    /// All trusted entries
    pub fn list_trusted(&self) -> Vec<TrustedSourceEntry> {
        self.trusted.iter().map(|e| e.clone()).collect()
    }

    /// All blocked entries
    pub fn list_blocked(&self) -> Vec<BlockedSourceEntry> {
        self.blocked.iter().map(|e| e.clone()).collect()
    }

    /// Trusted entries marked official within a category
    pub fn official_sources(&self, category: &str) -> Vec<TrustedSourceEntry> {
        self.trusted
            .iter()
            .filter(|e| e.is_official && e.category.as_deref() == Some(category))
            .map(|e| e.clone())
            .collect()
    }

    /// Drop expired temporary blocks, returning how many were lifted
    pub fn expire_blocks(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<String> = self
            .blocked
            .iter()
            .filter(|e| {
                !e.is_permanent && e.unblock_date.map(|d| d <= now).unwrap_or(false)
            })
            .map(|e| e.domain.clone())
            .collect();
        for domain in &expired {
            self.blocked.remove(domain);
            info!(domain = %domain, "Temporary block expired");
        }
        expired.len()
    }
}

impl Default for TrustRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_domain(domain: &str) -> Result<String> {
    let domain = domain.trim().to_ascii_lowercase();
    if domain.is_empty() {
        return Err(CredenceError::Registry(RegistryError::EmptyDomain));
    }
    Ok(domain)
}
