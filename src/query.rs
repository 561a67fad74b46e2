use std::collections::HashMap;

use crate::index::{InvertedIndex, PostingSet};
use crate::model::SearchField;

/// A search request: an unordered set of (field, term) constraints. `any` is
/// a valid key here even though it never appears in the index itself.
pub type Query = HashMap<SearchField, String>;

/// Evaluates `query` against `index`, returning the matching document ids.
///
/// `any`, if present, is resolved first by unioning postings across every
/// field for its term; the remaining constraints are then AND-ed into that
/// working set. Order among the remaining constraints is chosen by
/// postings-set size so the smaller side of each intersection is always the
/// one iterated. The moment the working set is empty the evaluation
/// short-circuits, since no further intersection can make it non-empty.
pub fn evaluate(index: &InvertedIndex, query: &Query) -> PostingSet {
    let mut remaining: Vec<(SearchField, &str)> = query
        .iter()
        .filter(|(field, _)| **field != SearchField::Any)
        .map(|(field, term)| (*field, term.as_str()))
        .collect();

    let mut working = match query.get(&SearchField::Any) {
        Some(term) => index.any_field_postings(term),
        None => {
            if remaining.is_empty() {
                return PostingSet::new();
            }
            // No `any`: seed the working set with the first constraint and
            // AND the rest, same as when `any` is present.
            let (field, term) = remaining.remove(0);
            index.postings(field, term)
        }
    };

    for (field, term) in remaining {
        if working.is_empty() {
            break;
        }
        let postings = index.postings(field, term);
        working = intersect(working, postings);
    }

    working
}

/// Iterates the smaller set and probes the larger, minimising work.
fn intersect(a: PostingSet, b: PostingSet) -> PostingSet {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.into_iter().filter(|id| large.contains(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentId;
    use std::collections::HashMap as Map;

    fn terms(pairs: &[(SearchField, &[&str])]) -> Map<SearchField, Vec<String>> {
        pairs
            .iter()
            .map(|(f, ts)| (*f, ts.iter().map(|t| t.to_string()).collect()))
            .collect()
    }

    #[test]
    fn any_unions_then_remaining_fields_and() {
        let index = InvertedIndex::new();
        let a = DocumentId::new();
        let b = DocumentId::new();
        index.add(
            a,
            &terms(&[(SearchField::Title, &["appmeta"]), (SearchField::License, &["apache-2.0"])]),
        );
        index.add(b, &terms(&[(SearchField::Title, &["appmeta"])]));

        let mut query = Query::new();
        query.insert(SearchField::Any, "appmeta".to_string());
        query.insert(SearchField::License, "apache-2.0".to_string());

        let hits = evaluate(&index, &query);
        assert_eq!(hits, [a].into_iter().collect());
    }

    #[test]
    fn no_any_ands_across_all_constraints() {
        let index = InvertedIndex::new();
        let a = DocumentId::new();
        index.add(
            a,
            &terms(&[(SearchField::Title, &["appmeta"]), (SearchField::License, &["apache-2.0"])]),
        );

        let mut query = Query::new();
        query.insert(SearchField::Title, "appmeta".to_string());
        query.insert(SearchField::License, "mit".to_string());

        assert!(evaluate(&index, &query).is_empty());
    }

    #[test]
    fn empty_working_set_short_circuits() {
        let index = InvertedIndex::new();
        let mut query = Query::new();
        query.insert(SearchField::Title, "nothing".to_string());
        query.insert(SearchField::License, "mit".to_string());
        assert!(evaluate(&index, &query).is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let index = InvertedIndex::new();
        assert!(evaluate(&index, &Query::new()).is_empty());
    }
}
