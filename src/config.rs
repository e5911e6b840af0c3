use std::env;

use crate::dialog::validation::ValidationMode;

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: String,
    pub model: String,
    pub api_url: String,
    pub temperature: f32,
}

impl ProviderConfig {
    pub fn from_env(provider: &str) -> Self {
        let provider = provider.to_lowercase();
        let prefix = provider.to_uppercase();

        // Get model from env or use defaults
        let model = env::var(format!("{}_MODEL", prefix))
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| match provider.as_str() {
                "openrouter" => "openai/gpt-3.5-turbo".to_string(),
                "deepseek" => "deepseek-chat".to_string(),
                "mistral" => "mistral-small-latest".to_string(),
                _ => "gpt-3.5-turbo".to_string(),
            });

        // Get API URL from env or use default
        let api_url = env::var(format!("{}_API_URL", prefix))
            .unwrap_or_else(|_| match provider.as_str() {
                "openrouter" => "https://openrouter.ai/api/v1/chat/completions".to_string(),
                "deepseek" => "https://api.deepseek.com/v1/chat/completions".to_string(),
                "mistral" => "https://api.mistral.ai/v1/chat/completions".to_string(),
                _ => "https://api.openai.com/v1/chat/completions".to_string(),
            });

        // Get temperature from env or use default
        let temperature = env::var(format!("{}_TEMPERATURE", prefix))
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.7);

        Self {
            provider,
            model,
            api_url,
            temperature,
        }
    }

    /// Name of the environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> String {
        format!("{}_API_KEY", self.provider.to_uppercase())
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DialogConfig {
    pub validation: ValidationMode,
}

impl DialogConfig {
    pub fn from_env() -> Self {
        let validation = env::var("NUTRITION_VALIDATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self { validation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        let config = ProviderConfig::from_env("NoSuchProvider");
        assert_eq!(config.provider, "nosuchprovider");
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert!(config.api_url.ends_with("/chat/completions"));
        assert_eq!(config.api_key_var(), "NOSUCHPROVIDER_API_KEY");
    }

    #[test]
    fn test_model_override() {
        let config = ProviderConfig::from_env("openai").with_model(Some("gpt-4o-mini".to_string()));
        assert_eq!(config.model, "gpt-4o-mini");
    }
}
