//! Provider presets for the OpenAI-compatible client.

use crate::openai_compatible::{OPENAI_API_BASE, OpenAICompatible, OpenAICompatibleConfig};
use autocoder_core::{LlmProvider, Result};

/// Gemini's OpenAI-compatible endpoint.
pub const GEMINI_OPENAI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Endpoint configuration for a provider family.
pub fn config_for(provider: LlmProvider) -> OpenAICompatibleConfig {
    match provider {
        LlmProvider::OpenAi => OpenAICompatibleConfig::new("openai", OPENAI_API_BASE),
        LlmProvider::Gemini => OpenAICompatibleConfig::new("gemini", GEMINI_OPENAI_API_BASE),
    }
}

/// Model used for agent work when none is configured.
pub fn default_model(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::OpenAi => DEFAULT_OPENAI_MODEL,
        LlmProvider::Gemini => DEFAULT_GEMINI_MODEL,
    }
}

/// Build a client pointed at the provider's public endpoint.
pub fn for_provider(provider: LlmProvider) -> Result<OpenAICompatible> {
    OpenAICompatible::new(config_for(provider))
}
