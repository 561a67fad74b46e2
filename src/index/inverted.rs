use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

use crate::model::{DocumentId, SearchField};

pub type PostingSet = HashSet<DocumentId>;

/// field → term → set of document ids. A single reader-writer lock guards
/// the whole structure: writers (`add`) take it exclusively for the
/// duration of one document's worth of postings, readers (`postings`,
/// `any_field_postings`) take it shared for the duration of a lookup. This
/// is deliberately coarse — the service is read-mostly and a single `add`
/// is O(terms for that document), so per-field locks would add complexity
/// without a measured need.
#[derive(Default)]
pub struct InvertedIndex {
    fields: RwLock<HashMap<SearchField, HashMap<String, PostingSet>>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Adds `id` under every (field, term) pair in `terms`. Fully visible to
    /// any search that acquires the lock afterward, or not visible at all —
    /// never partially, since the whole update runs under one write guard.
    pub fn add(&self, id: DocumentId, terms: &HashMap<SearchField, Vec<String>>) {
        let mut fields = self.fields.write();
        for (field, field_terms) in terms {
            let term_index = fields.entry(*field).or_default();
            for term in field_terms {
                term_index.entry(term.clone()).or_default().insert(id);
            }
        }
    }

    /// Missing field or term yields the empty set rather than an error.
    pub fn postings(&self, field: SearchField, term: &str) -> PostingSet {
        self.fields
            .read()
            .get(&field)
            .and_then(|term_index| term_index.get(term))
            .cloned()
            .unwrap_or_default()
    }

    /// Union of `postings(f, term)` across every indexed field. `any` is
    /// never itself a key in the structure (invariant I6); this method is
    /// the only way the wildcard gets resolved.
    pub fn any_field_postings(&self, term: &str) -> PostingSet {
        let fields = self.fields.read();
        let mut union = PostingSet::new();
        for term_index in fields.values() {
            if let Some(ids) = term_index.get(term) {
                union.extend(ids);
            }
        }
        union
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(pairs: &[(SearchField, &[&str])]) -> HashMap<SearchField, Vec<String>> {
        pairs
            .iter()
            .map(|(f, ts)| (*f, ts.iter().map(|t| t.to_string()).collect()))
            .collect()
    }

    #[test]
    fn add_then_postings_observes_the_id() {
        let index = InvertedIndex::new();
        let id = DocumentId::new();
        index.add(id, &terms(&[(SearchField::Title, &["appmeta"])]));
        assert!(index.postings(SearchField::Title, "appmeta").contains(&id));
    }

    #[test]
    fn missing_field_or_term_is_empty() {
        let index = InvertedIndex::new();
        assert!(index.postings(SearchField::Title, "nope").is_empty());
    }

    #[test]
    fn any_field_unions_across_fields() {
        let index = InvertedIndex::new();
        let a = DocumentId::new();
        let b = DocumentId::new();
        index.add(a, &terms(&[(SearchField::Title, &["vijay"])]));
        index.add(b, &terms(&[(SearchField::Name, &["vijay"])]));
        let union = index.any_field_postings("vijay");
        assert!(union.contains(&a) && union.contains(&b));
    }

    #[test]
    fn any_is_never_a_key() {
        let index = InvertedIndex::new();
        let id = DocumentId::new();
        index.add(id, &terms(&[(SearchField::Title, &["x"])]));
        assert!(index.postings(SearchField::Any, "x").is_empty());
    }
}
