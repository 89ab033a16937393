use chat_core::{ContextKind, MatchTier, RelevantDoc};
use serde::{Deserialize, Serialize};

/// Request payload for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message to answer.
    pub message: String,
    /// Conversation session; created on first use.
    #[serde(default = "default_session")]
    pub session_id: String,
    /// Optional override: passages retrieved per source.
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Optional override: sampling temperature for the retrieval-free path.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Toggles retrieval; defaults to on.
    #[serde(default = "default_true")]
    pub use_rag: bool,
}

fn default_session() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

/// Response payload for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub session_id: String,
    pub match_type: MatchTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_type: Option<ContextKind>,
    pub best_faq_similarity: f32,
    pub relevant_documents: Vec<RelevantDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}
