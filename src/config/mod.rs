mod defaults;
mod io;
mod types;
mod validation;

pub use defaults::*;
pub use io::*;
pub use types::*;
pub use validation::*;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Top-level clawgate configuration document.
///
/// This is the unit of persistence and of merge: every onboarding stage
/// consumes one `Config` value and returns a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub channels: ChannelsConfig,
    #[serde(default)]
    pub plugins: PluginsConfig,
    pub wizard: Option<WizardMetadata>,

    /// Subtrees this engine does not own, preserved verbatim across a
    /// read-merge-write cycle.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl Config {
    /// Load configuration from file, environment, and defaults.
    ///
    /// Used by the read-only CLI surfaces (`config show`, `config validate`).
    /// The onboarding snapshot reads the raw file without the env overlay,
    /// since merges must reflect the stored document.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .or_else(find_config_file)
            .unwrap_or_else(default_config_path);

        let mut config = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            let raw = read_config_file_raw(&config_path)?;
            serde_json::from_value(raw)?
        } else {
            info!("No config file found, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("CLAWGATE_GATEWAY_PORT") {
            if let Ok(port) = port.parse() {
                self.gateway.port = Some(port);
            }
        }

        if let Ok(bind) = std::env::var("CLAWGATE_GATEWAY_BIND") {
            self.gateway.bind = Some(bind);
        }

        if let Ok(token) = std::env::var("CLAWGATE_GATEWAY_TOKEN") {
            self.gateway.auth.token = Some(token);
        }

        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            self.models.providers.entry("anthropic".into()).or_insert(
                ModelProviderConfig {
                    api: Some(ModelApi::AnthropicMessages),
                    base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
                    api_key: None,
                    models: vec![],
                },
            );
            if let Some(provider) = self.models.providers.get_mut("anthropic") {
                if provider.api_key.is_none() {
                    provider.api_key = Some(key);
                }
            }
        }

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.models.providers.entry("openai".into()).or_insert(
                ModelProviderConfig {
                    api: Some(ModelApi::OpenaiCompletions),
                    base_url: "https://api.openai.com/v1".to_string(),
                    api_key: None,
                    models: vec![],
                },
            );
            if let Some(provider) = self.models.providers.get_mut("openai") {
                if provider.api_key.is_none() {
                    provider.api_key = Some(key);
                }
            }
        }

        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            self.channels.telegram.apply_token(&token);
        }

        if let Ok(token) = std::env::var("DISCORD_BOT_TOKEN") {
            self.channels.discord.apply_token(&token);
        }
    }
}

/// Find the configuration file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        PathBuf::from("clawgate.json"),
        PathBuf::from("clawgate.yaml"),
        PathBuf::from("clawgate.yml"),
        PathBuf::from("clawgate.toml"),
    ];

    for path in &candidates {
        if path.exists() {
            return Some(path.clone());
        }
    }

    let home_config = default_config_path();
    if home_config.exists() {
        return Some(home_config);
    }

    None
}

/// Well-known location of the persisted configuration document.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".clawgate").join("config.json"))
        .unwrap_or_else(|| PathBuf::from(".clawgate/config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_top_level_keys_round_trip() {
        let raw = serde_json::json!({
            "gateway": { "port": 19001 },
            "tools": { "exec": { "enabled": true } }
        });
        let config: Config = serde_json::from_value(raw).unwrap();
        assert_eq!(config.gateway.port, Some(19001));

        let out = serde_json::to_value(&config).unwrap();
        assert_eq!(out["tools"]["exec"]["enabled"], true);
    }

    #[test]
    fn camel_case_field_names() {
        let mut config = Config::default();
        config.gateway.custom_bind_host = Some("10.0.0.7".to_string());
        let out = serde_json::to_value(&config).unwrap();
        assert_eq!(out["gateway"]["customBindHost"], "10.0.0.7");
    }
}
