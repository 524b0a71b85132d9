//! Budget-manager constants: fixed overheads and provider retrieval ratios.

/// Fixed per-request overhead and provider-dependent retrieval ratio, used
/// to derive the default retrieved/history split for a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetParams {
    /// Reserved tokens for the system prompt.
    pub system_prompt_tokens: u32,
    /// Minimum tokens reserved for the user's own message.
    pub min_user_tokens: u32,
    /// Response buffer used when a model's own buffer is unknown.
    pub fallback_response_buffer: u32,
}

impl Default for BudgetParams {
    fn default() -> Self {
        Self {
            system_prompt_tokens: 3000,
            min_user_tokens: 2000,
            fallback_response_buffer: 12_000,
        }
    }
}

/// Retrieval-budget ratio for a model provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderRatio {
    Anthropic,
    Google,
    OpenAi,
    Unknown,
}

impl ProviderRatio {
    /// Resolve a ratio from a free-text provider name (case-insensitive).
    pub fn for_provider(provider: &str) -> Self {
        match provider.to_ascii_lowercase().as_str() {
            "anthropic" => ProviderRatio::Anthropic,
            "google" => ProviderRatio::Google,
            "openai" => ProviderRatio::OpenAi,
            _ => ProviderRatio::Unknown,
        }
    }

    /// The fraction of flexible budget allocated to retrieved content.
    pub fn ratio(&self) -> f64 {
        match self {
            ProviderRatio::Anthropic | ProviderRatio::Google => 0.70,
            ProviderRatio::OpenAi | ProviderRatio::Unknown => 0.65,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_providers_map_correctly() {
        assert_eq!(ProviderRatio::for_provider("Anthropic").ratio(), 0.70);
        assert_eq!(ProviderRatio::for_provider("google").ratio(), 0.70);
        assert_eq!(ProviderRatio::for_provider("OpenAI").ratio(), 0.65);
        assert_eq!(ProviderRatio::for_provider("mistral").ratio(), 0.65);
    }
}
