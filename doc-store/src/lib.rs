//! Qdrant-backed document store with embedding and ingestion support.
//!
//! Layout:
//! - `config`        — store and vector-space configuration
//! - `record`        — document and retrieval-hit models
//! - `index`         — the [`VectorIndex`] port
//! - `embed`         — the [`EmbeddingsProvider`] port plus backends
//! - `qdrant_facade` — thin adapter over `qdrant-client`
//! - `ingest`        — markdown discovery, chunking and indexing

pub mod config;
pub mod embed;
pub mod errors;
pub mod index;
pub mod ingest;
pub mod qdrant_facade;
pub mod record;

pub use config::{DistanceKind, StoreConfig, VectorSpace};
pub use embed::EmbeddingsProvider;
pub use errors::StoreError;
pub use index::{BoxFuture, VectorIndex};
pub use ingest::{IngestOptions, IngestStats, ingest_dir};
pub use record::{DocumentRecord, ScoredMatch, clamp_preview};

use qdrant_facade::QdrantFacade;
use tracing::warn;

/// Production [`VectorIndex`] backed by Qdrant.
pub struct DocStore {
    cfg: StoreConfig,
    facade: QdrantFacade,
}

impl DocStore {
    /// Builds a store from configuration. Does not touch the network.
    pub fn new(cfg: StoreConfig) -> Result<Self, StoreError> {
        let facade = QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, facade })
    }

    /// Creates the collection if missing.
    ///
    /// Requires `embedding_dim` in the config so the vector space is sized
    /// correctly up front.
    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        let size = self.cfg.embedding_dim.ok_or_else(|| {
            StoreError::Config("embedding_dim must be set before ensure_collection".into())
        })?;
        let space = VectorSpace {
            size,
            distance: self.cfg.distance,
        };
        self.facade.ensure_collection(&space).await
    }

    /// Collection name this store writes to.
    pub fn collection(&self) -> &str {
        &self.cfg.collection
    }
}

impl VectorIndex for DocStore {
    fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
    ) -> BoxFuture<'_, Result<Vec<ScoredMatch>, StoreError>> {
        Box::pin(async move {
            let hits = self
                .facade
                .search(vector, limit, self.cfg.exact_search)
                .await?;

            let mut out = Vec::with_capacity(hits.len());
            for (score, payload) in hits {
                match payload_to_match(score, &payload) {
                    Some(m) => out.push(m),
                    None => warn!("Dropping hit with malformed payload: {payload}"),
                }
            }
            Ok(out)
        })
    }

    fn insert(&self, record: DocumentRecord) -> BoxFuture<'_, Result<(), StoreError>> {
        Box::pin(async move {
            if let Some(want) = self.cfg.embedding_dim {
                if record.embedding.len() != want {
                    return Err(StoreError::VectorSizeMismatch {
                        got: record.embedding.len(),
                        want,
                    });
                }
            }
            let point = QdrantFacade::make_point(
                &record.filename,
                &record.content,
                record.is_faq,
                record.embedding,
            );
            self.facade.upsert_points(vec![point]).await
        })
    }

    fn count(&self) -> BoxFuture<'_, Result<u64, StoreError>> {
        Box::pin(async move { self.facade.count().await })
    }

    fn delete_all(&self) -> BoxFuture<'_, Result<u64, StoreError>> {
        Box::pin(async move { self.facade.delete_all().await })
    }

    fn exists<'a>(&'a self, filename: &'a str) -> BoxFuture<'a, Result<bool, StoreError>> {
        Box::pin(async move { self.facade.exists(filename).await })
    }
}

/// Maps a Qdrant payload into a [`ScoredMatch`].
///
/// Returns `None` when required fields are missing so a single bad point
/// cannot poison a whole result set.
fn payload_to_match(score: f32, payload: &serde_json::Value) -> Option<ScoredMatch> {
    let filename = payload.get("filename")?.as_str()?.to_string();
    let content = payload.get("content")?.as_str()?.to_string();
    let is_faq = payload
        .get("is_faq")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    Some(ScoredMatch {
        filename,
        content,
        similarity: score,
        is_faq,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_mapping_requires_core_fields() {
        let ok = serde_json::json!({
            "filename": "faq/hours.md",
            "content": "Opening hours are 9 to 5.",
            "is_faq": true
        });
        let m = payload_to_match(0.9, &ok).unwrap();
        assert_eq!(m.filename, "faq/hours.md");
        assert!(m.is_faq);
        assert_eq!(m.similarity, 0.9);

        let missing = serde_json::json!({ "content": "no name" });
        assert!(payload_to_match(0.5, &missing).is_none());
    }

    #[test]
    fn missing_faq_tag_defaults_to_document() {
        let p = serde_json::json!({ "filename": "a.md", "content": "x" });
        assert!(!payload_to_match(0.1, &p).unwrap().is_faq);
    }
}
