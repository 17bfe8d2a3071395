use super::Config;

/// A single validation finding, addressed by document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate a configuration document.
///
/// Unknown mode strings (bind, auth, tailscale) are deliberately not
/// flagged here; the quickstart resolver normalizes them with its own
/// fallback rules.
pub fn validate_config(config: &Config) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if config.gateway.port == Some(0) {
        issues.push(ConfigIssue {
            path: "gateway.port".to_string(),
            message: "Port must be greater than 0".to_string(),
        });
    }

    if config.gateway.custom_bind_host.as_deref() == Some("") {
        issues.push(ConfigIssue {
            path: "gateway.customBindHost".to_string(),
            message: "Custom bind host must not be empty when set".to_string(),
        });
    }

    for (name, provider) in &config.models.providers {
        if provider.base_url.is_empty() {
            issues.push(ConfigIssue {
                path: format!("models.providers.{name}.baseUrl"),
                message: "Provider base URL is required".to_string(),
            });
        }
    }

    for (name, channel) in [
        ("telegram", &config.channels.telegram),
        ("discord", &config.channels.discord),
        ("slack", &config.channels.slack),
        ("signal", &config.channels.signal),
        ("imessage", &config.channels.imessage),
    ] {
        if let Some(allow_from) = &channel.allow_from {
            if allow_from.iter().any(|e| e.trim().is_empty()) {
                issues.push(ConfigIssue {
                    path: format!("channels.{name}.allowFrom"),
                    message: "Allowlist entries must be non-empty".to_string(),
                });
            }
        }

        if channel.enabled == Some(true) && !config.plugins.contains(name) {
            issues.push(ConfigIssue {
                path: format!("channels.{name}.enabled"),
                message: format!("Channel is enabled but plugin '{name}' is not activated"),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChannelConfig, ModelProviderConfig};

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn zero_port_is_flagged() {
        let mut config = Config::default();
        config.gateway.port = Some(0);
        let issues = validate_config(&config);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "gateway.port");
    }

    #[test]
    fn unknown_bind_is_not_a_validation_issue() {
        let mut config = Config::default();
        config.gateway.bind = Some("satellite".to_string());
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn provider_without_base_url_is_flagged() {
        let mut config = Config::default();
        config
            .models
            .providers
            .insert("openai".to_string(), ModelProviderConfig::default());
        let issues = validate_config(&config);
        assert_eq!(issues[0].path, "models.providers.openai.baseUrl");
    }

    #[test]
    fn enabled_channel_without_plugin_is_flagged() {
        let mut config = Config::default();
        config.channels.telegram.enabled = Some(true);
        let issues = validate_config(&config);
        assert_eq!(issues[0].path, "channels.telegram.enabled");

        config.plugins.entries.push("telegram".to_string());
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn blank_allowlist_entry_is_flagged() {
        let mut config = Config::default();
        config.channels.telegram = ChannelConfig {
            allow_from: Some(vec!["123".to_string(), "   ".to_string()]),
            ..Default::default()
        };
        let issues = validate_config(&config);
        assert_eq!(issues[0].path, "channels.telegram.allowFrom");
    }
}
