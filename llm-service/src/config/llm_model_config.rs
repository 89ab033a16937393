use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// This struct contains both general and provider-specific parameters.
/// `temperature` and `max_tokens` are defaults; the generation calls may
/// override temperature per request (the RAG pipeline selects it from the
/// context kind).
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend (Groq or DeepSeek).
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"llama-3.3-70b-versatile"`).
    pub model: String,

    /// API base URL (e.g., `https://api.groq.com/openai`).
    pub endpoint: String,

    /// API key for authentication. Required by both providers.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Default sampling temperature when the caller does not supply one.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds. External calls are always bounded.
    pub timeout_secs: Option<u64>,
}
