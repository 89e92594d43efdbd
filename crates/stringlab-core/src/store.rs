//! In-memory record store keyed by the exact string value

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    analyzer::AnalysisRecord,
    error::{StoreError, StoreResult},
};

/// An analysis record as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredString {
    #[serde(flatten)]
    pub analysis: AnalysisRecord,
    /// Set once at insert time
    pub created_at: DateTime<Utc>,
}

impl AsRef<AnalysisRecord> for StoredString {
    fn as_ref(&self) -> &AnalysisRecord {
        &self.analysis
    }
}

/// Storage for analysed strings.
///
/// Keys are the exact, case-sensitive string value. Implementations must make
/// `insert` and `delete` atomic with respect to each other.
pub trait StringRepository: Send + Sync {
    /// Store a record, failing with [`StoreError::Conflict`] if its string is present
    fn insert(&self, analysis: AnalysisRecord) -> StoreResult<Arc<StoredString>>;

    /// Fetch the record for an exact string
    fn get(&self, value: &str) -> StoreResult<Arc<StoredString>>;

    /// Remove and return the record for an exact string
    fn delete(&self, value: &str) -> StoreResult<Arc<StoredString>>;

    /// Every record, in insertion order
    fn list_all(&self) -> Vec<Arc<StoredString>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Entry {
    seq: u64,
    record: Arc<StoredString>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    next_seq: u64,
}

/// [`StringRepository`] backed by a single mutex-guarded map
#[derive(Default)]
pub struct InMemoryStringStore {
    inner: Mutex<Inner>,
}

impl InMemoryStringStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StringRepository for InMemoryStringStore {
    fn insert(&self, analysis: AnalysisRecord) -> StoreResult<Arc<StoredString>> {
        let mut inner = self.inner.lock();
        if inner.entries.contains_key(&analysis.string) {
            return Err(StoreError::Conflict(analysis.string));
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;

        let record = Arc::new(StoredString {
            analysis,
            created_at: Utc::now(),
        });
        debug!(sha256 = %record.analysis.sha256, seq, "stored string");
        inner.entries.insert(
            record.analysis.string.clone(),
            Entry {
                seq,
                record: Arc::clone(&record),
            },
        );
        Ok(record)
    }

    fn get(&self, value: &str) -> StoreResult<Arc<StoredString>> {
        self.inner
            .lock()
            .entries
            .get(value)
            .map(|entry| Arc::clone(&entry.record))
            .ok_or_else(|| StoreError::NotFound(value.to_string()))
    }

    fn delete(&self, value: &str) -> StoreResult<Arc<StoredString>> {
        let removed = self
            .inner
            .lock()
            .entries
            .remove(value)
            .ok_or_else(|| StoreError::NotFound(value.to_string()))?;
        debug!(sha256 = %removed.record.analysis.sha256, "deleted string");
        Ok(removed.record)
    }

    fn list_all(&self) -> Vec<Arc<StoredString>> {
        let inner = self.inner.lock();
        let mut entries: Vec<&Entry> = inner.entries.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries
            .into_iter()
            .map(|entry| Arc::clone(&entry.record))
            .collect()
    }

    fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyse;

    #[test]
    fn insert_then_get_returns_same_record() {
        let store = InMemoryStringStore::new();
        let stored = store.insert(analyse("level")).unwrap();
        let fetched = store.get("level").unwrap();
        assert_eq!(stored, fetched);
        assert_eq!(fetched.analysis.length, 5);
    }

    #[test]
    fn duplicate_insert_conflicts_and_keeps_original() {
        let store = InMemoryStringStore::new();
        let first = store.insert(analyse("dup")).unwrap();
        let err = store.insert(analyse("dup")).unwrap_err();
        assert_eq!(err, StoreError::Conflict("dup".into()));
        assert_eq!(store.get("dup").unwrap().created_at, first.created_at);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let store = InMemoryStringStore::new();
        store.insert(analyse("Abc")).unwrap();
        store.insert(analyse("abc")).unwrap();
        assert_eq!(store.len(), 2);
        assert!(matches!(store.get("ABC"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn delete_missing_is_not_found_and_changes_nothing() {
        let store = InMemoryStringStore::new();
        store.insert(analyse("keep")).unwrap();
        assert_eq!(
            store.delete("gone").unwrap_err(),
            StoreError::NotFound("gone".into())
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_then_reinsert_succeeds() {
        let store = InMemoryStringStore::new();
        store.insert(analyse("again")).unwrap();
        store.delete("again").unwrap();
        assert!(store.is_empty());
        assert!(store.insert(analyse("again")).is_ok());
    }

    #[test]
    fn list_all_preserves_insertion_order() {
        let store = InMemoryStringStore::new();
        for value in ["zeta", "alpha", "mid", "beta"] {
            store.insert(analyse(value)).unwrap();
        }
        store.delete("mid").unwrap();
        store.insert(analyse("last")).unwrap();

        let order: Vec<String> = store
            .list_all()
            .iter()
            .map(|record| record.analysis.string.clone())
            .collect();
        assert_eq!(order, ["zeta", "alpha", "beta", "last"]);
    }

    #[test]
    fn stored_string_serializes_flat() {
        let store = InMemoryStringStore::new();
        let stored = store.insert(analyse("hi")).unwrap();
        let json = serde_json::to_value(&*stored).unwrap();
        assert_eq!(json["string"], "hi");
        assert_eq!(json["length"], 2);
        assert!(json["createdAt"].is_string());
    }
}
