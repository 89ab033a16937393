//! Embedding provider abstraction.
//!
//! The store and the query pipeline only depend on [`EmbeddingsProvider`];
//! concrete backends live in submodules.

pub mod noop_embedder;
pub mod ollama;

use crate::errors::StoreError;
use crate::index::BoxFuture;

/// Text-to-vector capability.
///
/// Implementations must be deterministic per input and return vectors of a
/// single, stable dimensionality.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds one text into a vector.
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, StoreError>>;

    /// Vector dimensionality this provider produces, when known.
    fn dim(&self) -> Option<usize> {
        None
    }
}
