use autocoder_core::{LlmConfig, LlmProvider};

/// Pick the crew's credential. An OpenAI key wins over a Gemini key; empty
/// values count as absent.
pub fn resolve_llm_config(openai_key: Option<&str>, gemini_key: Option<&str>) -> Option<LlmConfig> {
    let present = |key: Option<&str>| key.filter(|k| !k.is_empty()).map(str::to_string);

    if let Some(key) = present(openai_key) {
        tracing::info!(provider = %LlmProvider::OpenAi, "Using OpenAI configuration");
        return Some(LlmConfig::new(LlmProvider::OpenAi, key));
    }
    if let Some(key) = present(gemini_key) {
        tracing::info!(provider = %LlmProvider::Gemini, "Using Google Gemini configuration");
        return Some(LlmConfig::new(LlmProvider::Gemini, key));
    }
    tracing::info!("No API key found; agents fall back to the executor default");
    None
}

/// [`resolve_llm_config`] over `OPENAI_API_KEY` and `GEMINI_API_KEY`.
pub fn llm_config_from_env() -> Option<LlmConfig> {
    let openai = std::env::var("OPENAI_API_KEY").ok();
    let gemini = std::env::var("GEMINI_API_KEY").ok();
    resolve_llm_config(openai.as_deref(), gemini.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_takes_priority() {
        let config = resolve_llm_config(Some("sk-openai"), Some("gm-key")).unwrap();
        assert_eq!(config.provider, LlmProvider::OpenAi);
        assert_eq!(config.api_key, "sk-openai");
    }

    #[test]
    fn test_gemini_when_openai_missing() {
        let config = resolve_llm_config(None, Some("gm-key")).unwrap();
        assert_eq!(config.provider, LlmProvider::Gemini);

        let config = resolve_llm_config(Some(""), Some("gm-key")).unwrap();
        assert_eq!(config.provider, LlmProvider::Gemini);
    }

    #[test]
    fn test_none_without_keys() {
        assert!(resolve_llm_config(None, None).is_none());
        assert!(resolve_llm_config(Some(""), Some("")).is_none());
    }
}
