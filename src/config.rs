use crate::constants::{
    DEEPSEEK_BASE_URL, DEEPSEEK_DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT, OPENAI_BASE_URL,
    OPENAI_DEFAULT_MODEL, TEMPERATURE,
};
use crate::errors::{ColloquyError, ColloquyResult};

/// Provider presets. Presets pin the base URL and suggest a default
/// model; Custom leaves the URL editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    DeepSeek,
    Custom,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::DeepSeek, Provider::Custom];

    pub fn label(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::DeepSeek => "DeepSeek",
            Provider::Custom => "Custom",
        }
    }

    /// Pinned base URL for presets; Custom derives nothing.
    pub fn base_url(&self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some(OPENAI_BASE_URL),
            Provider::DeepSeek => Some(DEEPSEEK_BASE_URL),
            Provider::Custom => None,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi | Provider::Custom => OPENAI_DEFAULT_MODEL,
            Provider::DeepSeek => DEEPSEEK_DEFAULT_MODEL,
        }
    }

    pub fn next(&self) -> Provider {
        match self {
            Provider::OpenAi => Provider::DeepSeek,
            Provider::DeepSeek => Provider::Custom,
            Provider::Custom => Provider::OpenAi,
        }
    }

    pub fn prev(&self) -> Provider {
        match self {
            Provider::OpenAi => Provider::Custom,
            Provider::DeepSeek => Provider::OpenAi,
            Provider::Custom => Provider::DeepSeek,
        }
    }
}

/// Session-local configuration. Lives only for the current process;
/// nothing here is ever written to disk.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub provider: Provider,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub system_prompt: String,
    pub temperature: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAi,
            base_url: OPENAI_BASE_URL.to_string(),
            model: OPENAI_DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: TEMPERATURE,
        }
    }
}

impl SessionConfig {
    /// Switch providers, re-deriving the base URL for presets. The model
    /// name is replaced only if it still equals the old provider's
    /// default, so a hand-typed model survives toggling.
    pub fn set_provider(&mut self, provider: Provider) {
        let old_default = self.provider.default_model();
        if let Some(url) = provider.base_url() {
            self.base_url = url.to_string();
        }
        if self.model == old_default {
            self.model = provider.default_model().to_string();
        }
        self.provider = provider;
    }

    pub fn base_url_editable(&self) -> bool {
        self.provider == Provider::Custom
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn validate(&self) -> ColloquyResult<()> {
        if !self.has_credential() {
            return Err(ColloquyError::MissingCredential);
        }
        if self.model.trim().is_empty() {
            return Err(ColloquyError::config_error("model name is required"));
        }
        if self.base_url.trim().is_empty() {
            return Err(ColloquyError::config_error("base URL is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_switch_derives_url_and_default_model() {
        let mut config = SessionConfig::default();
        assert_eq!(config.base_url, OPENAI_BASE_URL);
        assert_eq!(config.model, OPENAI_DEFAULT_MODEL);

        config.set_provider(Provider::DeepSeek);
        assert_eq!(config.base_url, DEEPSEEK_BASE_URL);
        assert_eq!(config.model, DEEPSEEK_DEFAULT_MODEL);
    }

    #[test]
    fn hand_typed_model_survives_provider_toggle() {
        let mut config = SessionConfig::default();
        config.model = "gpt-4o".to_string();

        config.set_provider(Provider::DeepSeek);
        assert_eq!(config.model, "gpt-4o");
    }

    #[test]
    fn custom_keeps_previous_url() {
        let mut config = SessionConfig::default();
        config.set_provider(Provider::DeepSeek);
        config.set_provider(Provider::Custom);
        // Custom derives nothing; the last preset URL stays as a seed.
        assert_eq!(config.base_url, DEEPSEEK_BASE_URL);
        assert!(config.base_url_editable());
    }

    #[test]
    fn validate_requires_credential() {
        let config = SessionConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ColloquyError::MissingCredential)
        ));

        let mut config = SessionConfig::default();
        config.api_key = "sk-test".to_string();
        assert!(config.validate().is_ok());
    }
}
