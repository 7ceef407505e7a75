//! Source and content stores
//!
//! Collaborator interfaces for the persistence layer, with in-memory
//! implementations used by the service and by tests. The verification
//! core writes exactly one thing back: the assessed reliability score,
//! through a version-checked compare-and-set.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use credence_common::{ContentItem, Source, SourceStatus};

/// Errors from store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Source not found: {0}")]
    SourceNotFound(Uuid),

    #[error("Content item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Version conflict on source {id}: expected {expected}, found {actual}")]
    VersionConflict { id: Uuid, expected: u64, actual: u64 },

    #[error("Duplicate source name: {0}")]
    DuplicateName(String),
}

impl From<StoreError> for credence_common::CredenceError {
    fn from(err: StoreError) -> Self {
        use credence_common::{CredenceError, EntityKind};
        match err {
            StoreError::SourceNotFound(id) => CredenceError::NotFound {
                kind: EntityKind::Source,
                id: id.to_string(),
            },
            StoreError::ItemNotFound(id) => CredenceError::NotFound {
                kind: EntityKind::ContentItem,
                id: id.to_string(),
            },
            other => CredenceError::Storage(other.to_string()),
        }
    }
}

/// Store of registered sources
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Insert a new source
    async fn insert(&self, source: Source) -> Result<Uuid, StoreError>;

    /// Get a source by id
    async fn get(&self, id: &Uuid) -> Option<Source>;

    /// Persist an assessed reliability score
    ///
    /// Compare-and-set on the source's version counter. Concurrent
    /// assessments of the same source race on this write; the caller
    /// decides whether to retry on conflict (last-writer-wins once it
    /// re-reads) or give up.
    async fn update_reliability(
        &self,
        id: &Uuid,
        score: f64,
        status: Option<SourceStatus>,
        expected_version: u64,
    ) -> Result<Source, StoreError>;

    /// Total number of sources
    async fn count(&self) -> usize;
}

/// Store of collected content items
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert a new item
    async fn insert(&self, item: ContentItem) -> Result<Uuid, StoreError>;

    /// Get an item by id
    async fn get(&self, id: &Uuid) -> Option<ContentItem>;

    /// Most recently collected item for a source
    async fn latest_for_source(&self, source_id: &Uuid) -> Option<ContentItem>;

    /// Items sharing a grouping key, excluding a source's own items
    ///
    /// This is the sibling query behind cross-validation: same session,
    /// collected independently by other sources.
    async fn siblings(
        &self,
        session_id: &Uuid,
        exclude_source: &Uuid,
        limit: usize,
    ) -> Vec<ContentItem>;
}

/// In-memory source store backed by DashMap
pub struct InMemorySourceStore {
    sources: DashMap<Uuid, Source>,
}

impl InMemorySourceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            sources: DashMap::new(),
        }
    }
}

impl Default for InMemorySourceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceStore for InMemorySourceStore {
    async fn insert(&self, source: Source) -> Result<Uuid, StoreError> {
        if self.sources.iter().any(|s| s.name == source.name) {
            return Err(StoreError::DuplicateName(source.name));
        }
        let id = source.id;
        self.sources.insert(id, source);
        Ok(id)
    }

    async fn get(&self, id: &Uuid) -> Option<Source> {
        self.sources.get(id).map(|s| s.clone())
    }

    async fn update_reliability(
        &self,
        id: &Uuid,
        score: f64,
        status: Option<SourceStatus>,
        expected_version: u64,
    ) -> Result<Source, StoreError> {
        let mut entry = self
            .sources
            .get_mut(id)
            .ok_or(StoreError::SourceNotFound(*id))?;

        if entry.version != expected_version {
            return Err(StoreError::VersionConflict {
                id: *id,
                expected: expected_version,
                actual: entry.version,
            });
        }

        entry.apply_score(score);
        if let Some(status) = status {
            entry.status = status;
        }
        Ok(entry.clone())
    }

    async fn count(&self) -> usize {
        self.sources.len()
    }
}

/// In-memory content store backed by DashMap
pub struct InMemoryContentStore {
    items: DashMap<Uuid, ContentItem>,
}

impl InMemoryContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn insert(&self, item: ContentItem) -> Result<Uuid, StoreError> {
        let id = item.id;
        self.items.insert(id, item);
        Ok(id)
    }

    async fn get(&self, id: &Uuid) -> Option<ContentItem> {
        self.items.get(id).map(|i| i.clone())
    }

    async fn latest_for_source(&self, source_id: &Uuid) -> Option<ContentItem> {
        self.items
            .iter()
            .filter(|i| i.source_id == *source_id)
            .max_by_key(|i| i.collected_date)
            .map(|i| i.clone())
    }

    async fn siblings(
        &self,
        session_id: &Uuid,
        exclude_source: &Uuid,
        limit: usize,
    ) -> Vec<ContentItem> {
        self.items
            .iter()
            .filter(|i| i.session_id.as_ref() == Some(session_id) && i.source_id != *exclude_source)
            .map(|i| i.clone())
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use credence_common::SourceType;

    #[tokio::test]
    async fn test_insert_and_get_source() {
        let store = InMemorySourceStore::new();
        let source = Source::new("Test", SourceType::News);
        let id = store.insert(source).await.unwrap();

        let fetched = store.get(&id).await.unwrap();
        assert_eq!(fetched.name, "Test");
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let store = InMemorySourceStore::new();
        store.insert(Source::new("Same", SourceType::Api)).await.unwrap();
        let err = store.insert(Source::new("Same", SourceType::News)).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_update_reliability_version_check() {
        let store = InMemorySourceStore::new();
        let id = store.insert(Source::new("Test", SourceType::Api)).await.unwrap();

        let updated = store.update_reliability(&id, 0.8, None, 0).await.unwrap();
        assert!((updated.reliability_score - 0.8).abs() < f64::EPSILON);
        assert_eq!(updated.version, 1);

        // Stale version must not clobber the newer write
        let err = store.update_reliability(&id, 0.2, None, 0).await.unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { actual: 1, .. }));
    }

    #[tokio::test]
    async fn test_latest_for_source() {
        let store = InMemoryContentStore::new();
        let source_id = Uuid::new_v4();

        let mut older = ContentItem::new(source_id, "older");
        older.collected_date = Utc::now() - Duration::days(3);
        let newer = ContentItem::new(source_id, "newer");

        store.insert(older).await.unwrap();
        store.insert(newer).await.unwrap();

        let latest = store.latest_for_source(&source_id).await.unwrap();
        assert_eq!(latest.raw_content, "newer");
    }

    #[tokio::test]
    async fn test_siblings_excludes_own_source() {
        let store = InMemoryContentStore::new();
        let session = Uuid::new_v4();
        let mine = Uuid::new_v4();
        let other = Uuid::new_v4();

        store
            .insert(ContentItem::new(mine, "mine").with_session(session))
            .await
            .unwrap();
        store
            .insert(ContentItem::new(other, "theirs").with_session(session))
            .await
            .unwrap();
        store.insert(ContentItem::new(other, "unrelated")).await.unwrap();

        let siblings = store.siblings(&session, &mine, 10).await;
        assert_eq!(siblings.len(), 1);
        assert_eq!(siblings[0].raw_content, "theirs");
    }
}
