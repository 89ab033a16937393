//! Threshold-filtered similarity retrieval.

use std::cmp::Ordering;
use std::sync::Arc;

use doc_store::{EmbeddingsProvider, ScoredMatch, VectorIndex};
use tracing::debug;

use crate::error::Result;

/// Stateless retrieval stage over the vector index.
///
/// Embeds the query once, performs one nearest-neighbor search over the full
/// index and post-filters by score. Scope filtering (FAQ vs general) is done
/// by callers after retrieval so this stage stays independent of the index's
/// filtering capabilities.
#[derive(Clone)]
pub struct Retriever {
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn EmbeddingsProvider>,
}

impl Retriever {
    pub fn new(index: Arc<dyn VectorIndex>, embedder: Arc<dyn EmbeddingsProvider>) -> Self {
        Self { index, embedder }
    }

    /// Returns matches with `similarity >= threshold`, best first, at most
    /// `max_results`. Ties keep index order (stable sort).
    ///
    /// Embedding and search failures propagate unchanged; no retries.
    pub async fn retrieve(
        &self,
        query: &str,
        threshold: f32,
        max_results: usize,
    ) -> Result<Vec<ScoredMatch>> {
        let vector = self.embedder.embed(query).await?;
        let mut hits = self.index.search(vector, max_results as u64).await?;

        hits.retain(|m| m.similarity >= threshold);
        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        hits.truncate(max_results);

        debug!(
            target: "chat_core::retriever",
            "retrieve: threshold={threshold} max={max_results} -> {} hits",
            hits.len()
        );
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubEmbedder, StubIndex};

    fn m(filename: &str, sim: f32, is_faq: bool) -> ScoredMatch {
        ScoredMatch {
            filename: filename.into(),
            content: format!("content of {filename}"),
            similarity: sim,
            is_faq,
        }
    }

    #[tokio::test]
    async fn filters_below_threshold_and_sorts_descending() {
        let index = Arc::new(StubIndex::with_matches(vec![
            m("a.md", 0.50, false),
            m("b.md", 0.90, false),
            m("c.md", 0.70, false),
        ]));
        let r = Retriever::new(index, Arc::new(StubEmbedder::default()));

        let hits = r.retrieve("q", 0.6, 10).await.unwrap();
        let names: Vec<_> = hits.iter().map(|h| h.filename.as_str()).collect();
        assert_eq!(names, vec!["b.md", "c.md"]);
    }

    #[tokio::test]
    async fn equal_scores_keep_index_order() {
        let index = Arc::new(StubIndex::with_matches(vec![
            m("first.md", 0.8, false),
            m("second.md", 0.8, true),
            m("top.md", 0.9, false),
        ]));
        let r = Retriever::new(index, Arc::new(StubEmbedder::default()));

        let hits = r.retrieve("q", 0.0, 10).await.unwrap();
        let names: Vec<_> = hits.iter().map(|h| h.filename.as_str()).collect();
        assert_eq!(names, vec!["top.md", "first.md", "second.md"]);
    }

    #[tokio::test]
    async fn truncates_to_max_results() {
        let index = Arc::new(StubIndex::with_matches(vec![
            m("a.md", 0.9, false),
            m("b.md", 0.8, false),
            m("c.md", 0.7, false),
        ]));
        let r = Retriever::new(index, Arc::new(StubEmbedder::default()));
        let hits = r.retrieve("q", 0.0, 2).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn empty_when_nothing_meets_threshold() {
        let index = Arc::new(StubIndex::with_matches(vec![m("a.md", 0.3, false)]));
        let r = Retriever::new(index, Arc::new(StubEmbedder::default()));
        assert!(r.retrieve("q", 0.65, 5).await.unwrap().is_empty());
    }
}
