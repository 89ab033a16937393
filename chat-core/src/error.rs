//! Error types for the query pipeline.

use thiserror::Error;

/// Failures that escape the pipeline to the caller.
///
/// Generation failures never appear here; they are degraded into the query
/// result at the call site. Store and embedding failures represent
/// infrastructure outages and do propagate.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Vector store or embedding backend failure.
    #[error("[Chat Core] store error: {0}")]
    Store(#[from] doc_store::StoreError),

    /// LLM service failure outside the guarded generation call.
    #[error("[Chat Core] llm error: {0}")]
    Llm(#[from] llm_service::LlmServiceError),

    /// Invalid pipeline configuration.
    #[error("[Chat Core] config error: {0}")]
    Config(String),
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ChatError>;
