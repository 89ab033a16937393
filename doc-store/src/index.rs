//! Abstract vector-index capability consumed by the query pipeline.
//!
//! The pipeline depends only on this trait; the Qdrant-backed [`DocStore`]
//! (see `lib.rs`) is the production implementation, and tests substitute
//! in-memory stubs.

use std::{future::Future, pin::Pin};

use crate::errors::StoreError;
use crate::record::{DocumentRecord, ScoredMatch};

/// Boxed future alias used by the async port traits.
///
/// Async is expressed via `Pin<Box<dyn Future>>` because real backends
/// perform HTTP requests.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Storage and nearest-neighbor search over document records.
///
/// Score semantics: higher is more similar, bounded to `[0, 1]`; results are
/// ordered by descending score with stable order on ties.
pub trait VectorIndex: Send + Sync {
    /// Nearest-neighbor search with a ready query vector.
    fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
    ) -> BoxFuture<'_, Result<Vec<ScoredMatch>, StoreError>>;

    /// Inserts (or fully replaces) a document record.
    fn insert(&self, record: DocumentRecord) -> BoxFuture<'_, Result<(), StoreError>>;

    /// Number of stored records.
    fn count(&self) -> BoxFuture<'_, Result<u64, StoreError>>;

    /// Removes every record; returns the number deleted.
    fn delete_all(&self) -> BoxFuture<'_, Result<u64, StoreError>>;

    /// Whether a record with this filename is already stored.
    fn exists<'a>(&'a self, filename: &'a str) -> BoxFuture<'a, Result<bool, StoreError>>;
}
