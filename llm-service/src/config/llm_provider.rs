/// Represents the provider (backend) used for chat completions.
///
/// Both supported providers expose an OpenAI-compatible REST API; the enum
/// exists so the rest of the application depends on a provider *choice*
/// rather than a concrete client type.
///
/// Adding more providers in the future (e.g., OpenAI, Anthropic) can be done
/// by extending this enum and adding a matching service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Groq cloud API (Llama family, very low latency).
    Groq,
    /// DeepSeek cloud API.
    DeepSeek,
}

impl LlmProvider {
    /// Parses a provider name as found in `LLM_PROVIDER` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "groq" => Some(Self::Groq),
            "deepseek" => Some(Self::DeepSeek),
            _ => None,
        }
    }
}
