use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Gateway Configuration
// ============================================================================

/// How the gateway binds its listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayBindMode {
    #[default]
    Loopback,
    Lan,
    Auto,
    Custom,
    Tailnet,
}

impl std::str::FromStr for GatewayBindMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loopback" => Ok(Self::Loopback),
            "lan" => Ok(Self::Lan),
            "auto" => Ok(Self::Auto),
            "custom" => Ok(Self::Custom),
            "tailnet" => Ok(Self::Tailnet),
            _ => Err(format!("invalid bind mode: {s}")),
        }
    }
}

impl std::fmt::Display for GatewayBindMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Loopback => "loopback",
            Self::Lan => "lan",
            Self::Auto => "auto",
            Self::Custom => "custom",
            Self::Tailnet => "tailnet",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayAuthMode {
    #[default]
    Token,
    Password,
}

impl std::str::FromStr for GatewayAuthMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "token" => Ok(Self::Token),
            "password" => Ok(Self::Password),
            _ => Err(format!("invalid auth mode: {s}")),
        }
    }
}

impl std::fmt::Display for GatewayAuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Token => "token",
            Self::Password => "password",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayTailscaleMode {
    #[default]
    Off,
    Serve,
    Funnel,
}

impl std::str::FromStr for GatewayTailscaleMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "serve" => Ok(Self::Serve),
            "funnel" => Ok(Self::Funnel),
            _ => Err(format!("invalid tailscale mode: {s}")),
        }
    }
}

impl std::fmt::Display for GatewayTailscaleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::Serve => "serve",
            Self::Funnel => "funnel",
        })
    }
}

/// Gateway auth section as persisted.
///
/// `mode` is kept as a raw string so documents written by other tools or
/// older versions survive the snapshot; normalization to [`GatewayAuthMode`]
/// happens exactly once, in the quickstart resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GatewayAuthConfig {
    pub mode: Option<String>,
    pub token: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GatewayTailscaleConfig {
    pub mode: Option<String>,
    #[serde(default)]
    pub reset_on_exit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    pub mode: Option<String>,
    pub port: Option<u16>,
    /// Raw bind value; unknown strings normalize to loopback at resolve time.
    pub bind: Option<String>,
    pub custom_bind_host: Option<String>,
    #[serde(default)]
    pub auth: GatewayAuthConfig,
    pub tailscale: Option<GatewayTailscaleConfig>,
}

// ============================================================================
// Agents Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentDefaultsConfig {
    /// Absolute path to the agent workspace, set once per onboarding run.
    pub workspace: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentsConfig {
    pub defaults: Option<AgentDefaultsConfig>,
}

// ============================================================================
// Models Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ModelApi {
    #[default]
    OpenaiCompletions,
    OpenaiResponses,
    AnthropicMessages,
    GoogleGenerativeAi,
    Ollama,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinitionConfig {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelProviderConfig {
    pub api: Option<ModelApi>,
    #[serde(default)]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default)]
    pub models: Vec<ModelDefinitionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelsConfig {
    #[serde(default)]
    pub providers: HashMap<String, ModelProviderConfig>,
}

// ============================================================================
// Channels Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DmPolicy {
    Pairing,
    Allowlist,
    #[default]
    Open,
    Disabled,
}

/// Settings shared by every built-in channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    pub enabled: Option<bool>,
    pub bot_token: Option<String>,
    pub dm_policy: Option<DmPolicy>,
    pub allow_from: Option<Vec<String>>,
}

impl ChannelConfig {
    /// Set a bot token only when none is configured yet.
    pub fn apply_token(&mut self, token: &str) {
        if self.bot_token.is_none() {
            self.bot_token = Some(token.to_string());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChannelsConfig {
    #[serde(default)]
    pub telegram: ChannelConfig,
    #[serde(default)]
    pub discord: ChannelConfig,
    #[serde(default)]
    pub slack: ChannelConfig,
    #[serde(default)]
    pub signal: ChannelConfig,
    #[serde(default)]
    pub imessage: ChannelConfig,
    /// Extension channels loaded via plugins.
    #[serde(flatten)]
    pub extensions: HashMap<String, serde_json::Value>,
}

// ============================================================================
// Plugins Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PluginsConfig {
    /// Enabled plugin identifiers, one per active channel.
    /// Order-preserving, duplicate-free.
    #[serde(default)]
    pub entries: Vec<String>,
}

impl PluginsConfig {
    pub fn contains(&self, plugin_id: &str) -> bool {
        self.entries.iter().any(|p| p == plugin_id)
    }
}

// ============================================================================
// Wizard Metadata
// ============================================================================

/// Audit stamp recording which onboarding flow produced this document.
/// Last write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardMetadata {
    pub command: String,
    pub mode: String,
    pub timestamp: String,
}
