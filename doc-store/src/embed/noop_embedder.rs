//! No-op embedder producing zero vectors of a fixed size.
//!
//! Useful for wiring tests and dry runs without a model server.

use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::index::BoxFuture;

pub struct NoopEmbedder {
    size: usize,
}

impl NoopEmbedder {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl EmbeddingsProvider for NoopEmbedder {
    fn embed<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, StoreError>> {
        let v = vec![0.0; self.size];
        Box::pin(async move { Ok(v) })
    }

    fn dim(&self) -> Option<usize> {
        Some(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn produces_fixed_size_zero_vectors() {
        let e = NoopEmbedder::new(8);
        let v = e.embed("anything").await.unwrap();
        assert_eq!(v.len(), 8);
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
