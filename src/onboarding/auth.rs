use crate::config::{
    AgentDefaultsConfig, Config, ModelApi, ModelDefinitionConfig, ModelProviderConfig,
    DEFAULT_MODEL_ID, DEFAULT_MODEL_NAME, DEFAULT_PROVIDER_BASE_URL, DEFAULT_PROVIDER_KEY,
};

/// A concrete provider selection made during onboarding.
#[derive(Clone)]
pub struct ProviderChoice {
    /// Provider key under `models.providers` (e.g. "anthropic").
    pub key: String,
    pub api: ModelApi,
    pub base_url: String,
    /// Credential supplied by the user; never sourced from embedded defaults.
    pub api_key: Option<String>,
    /// When set, becomes the agents default model.
    pub default_model: Option<String>,
}

/// The auth/model strategy chosen during onboarding.
#[derive(Clone, Default)]
pub enum AuthChoice {
    Provider(ProviderChoice),
    /// Keep whatever is configured; seed a default provider only when the
    /// provider map is completely empty.
    #[default]
    Skip,
}

fn default_model_descriptor() -> ModelDefinitionConfig {
    ModelDefinitionConfig {
        id: DEFAULT_MODEL_ID.to_string(),
        name: DEFAULT_MODEL_NAME.to_string(),
    }
}

fn set_default_model(config: &mut Config, model: &str) {
    let defaults = config
        .agents
        .defaults
        .get_or_insert_with(AgentDefaultsConfig::default);
    defaults.model = Some(model.to_string());
}

/// Merge an auth/model choice into the configuration.
///
/// Existing provider entries are never discarded: a matching entry keeps
/// every field it already has and only an absent `apiKey` is filled in.
/// A fresh entry is seeded with one default model descriptor.
pub fn apply_auth_choice(config: Config, choice: &AuthChoice) -> Config {
    let mut next = config;

    match choice {
        AuthChoice::Provider(provider) => {
            match next.models.providers.get_mut(&provider.key) {
                Some(existing) => {
                    if existing.api_key.is_none() {
                        existing.api_key = provider.api_key.clone();
                    }
                }
                None => {
                    next.models.providers.insert(
                        provider.key.clone(),
                        ModelProviderConfig {
                            api: Some(provider.api),
                            base_url: provider.base_url.clone(),
                            api_key: provider.api_key.clone(),
                            models: vec![default_model_descriptor()],
                        },
                    );
                }
            }

            if let Some(model) = &provider.default_model {
                set_default_model(&mut next, model);
            }
        }
        AuthChoice::Skip => {
            if next.models.providers.is_empty() {
                next.models.providers.insert(
                    DEFAULT_PROVIDER_KEY.to_string(),
                    ModelProviderConfig {
                        api: Some(ModelApi::AnthropicMessages),
                        base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
                        api_key: None,
                        models: vec![default_model_descriptor()],
                    },
                );
                if next
                    .agents
                    .defaults
                    .as_ref()
                    .and_then(|d| d.model.as_ref())
                    .is_none()
                {
                    set_default_model(&mut next, DEFAULT_MODEL_ID);
                }
            }
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anthropic_choice(key: Option<&str>) -> AuthChoice {
        AuthChoice::Provider(ProviderChoice {
            key: "anthropic".to_string(),
            api: ModelApi::AnthropicMessages,
            base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            api_key: key.map(String::from),
            default_model: Some(DEFAULT_MODEL_ID.to_string()),
        })
    }

    #[test]
    fn fresh_provider_is_seeded_with_one_model() {
        let config = apply_auth_choice(Config::default(), &anthropic_choice(Some("sk-test")));
        let provider = &config.models.providers["anthropic"];
        assert_eq!(provider.api_key.as_deref(), Some("sk-test"));
        assert_eq!(provider.models.len(), 1);
        assert_eq!(provider.models[0].id, DEFAULT_MODEL_ID);
        assert_eq!(
            config.agents.defaults.unwrap().model.as_deref(),
            Some(DEFAULT_MODEL_ID)
        );
    }

    #[test]
    fn existing_provider_entry_is_preserved_verbatim() {
        let mut config = Config::default();
        config.models.providers.insert(
            "anthropic".to_string(),
            ModelProviderConfig {
                api: Some(ModelApi::AnthropicMessages),
                base_url: "https://proxy.internal".to_string(),
                api_key: Some("sk-old".to_string()),
                models: vec![
                    ModelDefinitionConfig {
                        id: "m1".to_string(),
                        name: "One".to_string(),
                    },
                    ModelDefinitionConfig {
                        id: "m2".to_string(),
                        name: "Two".to_string(),
                    },
                ],
            },
        );

        let config = apply_auth_choice(config, &anthropic_choice(Some("sk-new")));
        let provider = &config.models.providers["anthropic"];
        assert_eq!(provider.api_key.as_deref(), Some("sk-old"));
        assert_eq!(provider.base_url, "https://proxy.internal");
        assert_eq!(provider.models.len(), 2);
    }

    #[test]
    fn missing_api_key_gap_is_filled() {
        let mut config = Config::default();
        config.models.providers.insert(
            "anthropic".to_string(),
            ModelProviderConfig {
                api: Some(ModelApi::AnthropicMessages),
                base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
                api_key: None,
                models: vec![],
            },
        );

        let config = apply_auth_choice(config, &anthropic_choice(Some("sk-new")));
        let provider = &config.models.providers["anthropic"];
        assert_eq!(provider.api_key.as_deref(), Some("sk-new"));
        // Seeding rules apply only to fresh entries.
        assert!(provider.models.is_empty());
    }

    #[test]
    fn skip_seeds_default_provider_without_credentials() {
        let config = apply_auth_choice(Config::default(), &AuthChoice::Skip);
        let provider = &config.models.providers[DEFAULT_PROVIDER_KEY];
        assert_eq!(provider.api_key, None);
        assert_eq!(provider.models.len(), 1);
    }

    #[test]
    fn skip_leaves_populated_providers_alone() {
        let mut config = Config::default();
        config.models.providers.insert(
            "openai".to_string(),
            ModelProviderConfig {
                api: Some(ModelApi::OpenaiCompletions),
                base_url: "https://api.openai.com/v1".to_string(),
                api_key: Some("sk".to_string()),
                models: vec![],
            },
        );

        let config = apply_auth_choice(config, &AuthChoice::Skip);
        assert_eq!(config.models.providers.len(), 1);
        assert!(config.models.providers.contains_key("openai"));
        assert!(config.agents.defaults.is_none());
    }
}
