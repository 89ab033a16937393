//! FAQ-aware retrieval-augmented chat pipeline.
//!
//! Per query the pipeline embeds the question, searches the vector index,
//! classifies how strongly it matches the curated FAQ set, assembles a
//! tier-appropriate context bundle and calls the generation backend.
//! Sessions carry a bounded conversation history and live in an explicit
//! registry.

pub mod cfg;
pub mod classifier;
pub mod composer;
pub mod error;
pub mod generation;
pub mod history;
pub mod pipeline;
pub mod prompt;
pub mod retriever;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cfg::ChatConfig;
pub use classifier::FaqClassifier;
pub use composer::compose;
pub use error::{ChatError, Result};
pub use generation::{GenerationPort, ProviderGenerator};
pub use history::{ConversationHistory, ConversationTurn};
pub use pipeline::QueryPipeline;
pub use retriever::Retriever;
pub use session::{ChatOptions, ChatSession, SessionRegistry};
pub use types::{
    Classification, ContextBundle, ContextKind, DocKind, MatchTier, QueryResult, RelevantDoc,
};
