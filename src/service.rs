use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::analysis::Analyzer;
use crate::error::{Result, ServiceError};
use crate::index::InvertedIndex;
use crate::model::{DocumentId, Metadata, SearchField, StoredDocument};
use crate::query::{self, Query};
use crate::store::DocumentStore;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The error raised when a search or getAll is cancelled before it completes.
#[derive(Debug, thiserror::Error)]
#[error("request cancelled")]
pub struct Cancelled;

/// Orchestrates the analyzer, document store and inverted index behind the
/// operations the transport layer calls. Cheap to clone: every field is
/// itself cheaply shareable (`Arc`, or internally synchronised).
#[derive(Clone)]
pub struct Service {
    analyzer: Arc<Analyzer>,
    store: Arc<DocumentStore>,
    index: Arc<InvertedIndex>,
}

impl Service {
    pub fn new(analyzer: Analyzer) -> Self {
        Service {
            analyzer: Arc::new(analyzer),
            store: Arc::new(DocumentStore::new()),
            index: Arc::new(InvertedIndex::new()),
        }
    }

    /// Validates, tokenises and indexes `metadata`, returning its new id.
    pub fn insert(&self, metadata: Metadata) -> Result<DocumentId> {
        metadata.validate()?;

        let terms = self.analyzer.analyze(&metadata);
        tracing::debug!(?terms, "metadata tokens");

        let id = DocumentId::new();
        self.store.put(id, metadata);
        self.index.add(id, &terms);

        tracing::info!(%id, "inserted document");
        Ok(id)
    }

    /// Runs `raw_query` (string field names, already-cased terms) against the
    /// index. Unknown field names are rejected; term values are lowercased
    /// before lookup so search is case-insensitive.
    pub fn search(&self, raw_query: &HashMap<String, String>, cancel: &CancellationToken) -> Result<Vec<StoredDocument>> {
        if cancel.is_cancelled() {
            return Err(ServiceError::Internal(Cancelled.to_string()));
        }

        let mut query = Query::new();
        for (field_name, term) in raw_query {
            let field: SearchField = field_name.parse().map_err(|_| {
                tracing::warn!(field = %field_name, "search rejected for unknown field");
                ServiceError::UnknownField(field_name.clone())
            })?;
            query.insert(field, term.to_lowercase());
        }

        if query.is_empty() {
            return Ok(self.get_all());
        }

        let hits = query::evaluate(&self.index, &query);

        if cancel.is_cancelled() {
            return Err(ServiceError::Internal(Cancelled.to_string()));
        }

        let results: Vec<StoredDocument> = hits
            .into_iter()
            .filter_map(|id| self.store.get(id).map(|metadata| StoredDocument { id, metadata }))
            .collect();

        tracing::info!(hits = results.len(), "search completed");
        Ok(results)
    }

    pub fn get_all(&self) -> Vec<StoredDocument> {
        self.store
            .snapshot()
            .into_iter()
            .map(|(id, metadata)| StoredDocument { id, metadata })
            .collect()
    }

    pub fn get(&self, id: DocumentId) -> Result<StoredDocument> {
        self.store
            .get(id)
            .map(|metadata| StoredDocument { id, metadata })
            .ok_or(ServiceError::NotFound(id))
    }

    /// Delete is not implemented: the document store and inverted index have
    /// no coordinated removal path, and silently reporting success (or a
    /// bare `false`) would misrepresent that. Callers get an explicit error.
    pub fn delete(&self, _id: DocumentId) -> Result<bool> {
        Err(ServiceError::Unimplemented)
    }

    pub fn size(&self) -> u64 {
        self.store.size()
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }

    pub fn health(&self) -> bool {
        true
    }

    /// Idempotent no-op; the service holds no background tasks or open
    /// connections of its own to drain.
    pub async fn shutdown(&self, deadline: Duration) -> Result<()> {
        let _ = tokio::time::timeout(deadline, async {}).await;
        Ok(())
    }
}
