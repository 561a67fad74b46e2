use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::model::{DocumentId, Metadata};

/// Concurrent id→payload mapping. Reads never block writers and vice versa
/// (invariant I1/I3): once `put` returns, `get`/`snapshot` observe the
/// document, and `size` always equals the number of entries put so far.
#[derive(Default)]
pub struct DocumentStore {
    documents: DashMap<DocumentId, Metadata>,
    count: AtomicU64,
}

impl DocumentStore {
    pub fn new() -> Self {
        DocumentStore::default()
    }

    /// Unconditional insert; the caller guarantees `id` is unique.
    pub fn put(&self, id: DocumentId, payload: Metadata) {
        self.documents.insert(id, payload);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, id: DocumentId) -> Option<Metadata> {
        self.documents.get(&id).map(|entry| entry.value().clone())
    }

    /// A consistent-enough snapshot: concurrent inserts may or may not be
    /// reflected, but every entry returned resolves to a real payload.
    pub fn snapshot(&self) -> Vec<(DocumentId, Metadata)> {
        self.documents
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    pub fn size(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Maintainer;

    fn sample() -> Metadata {
        Metadata {
            title: "appmeta".to_string(),
            version: "0.1.0".to_string(),
            maintainers: vec![Maintainer {
                name: "Vijay Poliboyina".to_string(),
                email: "vijaykp@gmail.com".to_string(),
            }],
            company: "feye Inc.".to_string(),
            website: "https://feye.io".to_string(),
            source: "https://github.com/feye.io".to_string(),
            license: "Apache-2.0".to_string(),
            description: "App metadata service".to_string(),
        }
    }

    #[test]
    fn put_then_get_round_trips_and_bumps_size() {
        let store = DocumentStore::new();
        let id = DocumentId::new();
        store.put(id, sample());
        assert_eq!(store.size(), 1);
        assert_eq!(store.get(id).unwrap().title, "appmeta");
    }

    #[test]
    fn unknown_id_is_none() {
        let store = DocumentStore::new();
        assert!(store.get(DocumentId::new()).is_none());
    }

    #[test]
    fn duplicate_content_gets_distinct_ids() {
        let store = DocumentStore::new();
        let a = DocumentId::new();
        let b = DocumentId::new();
        store.put(a, sample());
        store.put(b, sample());
        assert_ne!(a, b);
        assert_eq!(store.size(), 2);
        assert_eq!(store.snapshot().len(), 2);
    }
}
