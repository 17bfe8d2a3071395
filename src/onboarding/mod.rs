//! Setup-time configuration reconciliation.
//!
//! The pipeline reads a snapshot of the persisted document, derives
//! quickstart defaults from it, layers user answers on top, merges auth,
//! gateway, and channel settings, stamps wizard metadata, and persists the
//! result. Every stage consumes one configuration value and returns a new
//! one; writes happen only at the two checkpoints after full merges.

mod auth;
mod channels;
mod gateway;
mod metadata;
mod prompt;
mod quickstart;
mod snapshot;
mod writer;

pub use auth::{apply_auth_choice, AuthChoice, ProviderChoice};
pub use channels::{enable_channel, merge_allow_from, Channel, ChannelSettings};
pub use gateway::{configure_gateway, generate_gateway_token, GatewayOverrides, GatewaySettings};
pub use metadata::stamp_wizard_metadata;
pub use prompt::{ConsolePrompt, Prompt, TextPrompt};
pub use quickstart::{resolve_quickstart_defaults, QuickstartDefaults};
pub use snapshot::{read_config_snapshot, ConfigSnapshot};
pub use writer::{write_config, StorageError};

use std::path::PathBuf;

use tracing::info;

use crate::config::{
    default_workspace_dir, AgentDefaultsConfig, Config, ConfigIssue, DmPolicy, GatewayBindMode,
    GatewayTailscaleMode, DEFAULT_PROVIDER_BASE_URL,
};

/// Which onboarding flow produced a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingMode {
    /// Minimal questions, resolved defaults for everything else.
    Quickstart,
    /// Full gateway questionnaire (port, bind, tailscale).
    Manual,
}

impl std::fmt::Display for OnboardingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Quickstart => "quickstart",
            Self::Manual => "manual",
        })
    }
}

/// Everything an onboarding run needs, constructed once by the caller and
/// passed down. There is no process-wide default.
#[derive(Debug, Clone)]
pub struct OnboardingContext {
    pub config_path: PathBuf,
    pub command: String,
    pub mode: OnboardingMode,
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    /// The stored document exists but fails validation. Fatal; the
    /// on-disk document is left untouched.
    #[error("configuration at '{path}' failed validation")]
    InvalidConfig {
        path: PathBuf,
        issues: Vec<ConfigIssue>,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("prompt surface failed")]
    Prompt(#[source] anyhow::Error),
}

/// Fill in the agent workspace when none is configured yet.
fn ensure_workspace(config: Config) -> Config {
    let mut next = config;
    let defaults = next
        .agents
        .defaults
        .get_or_insert_with(AgentDefaultsConfig::default);
    if defaults.workspace.is_none() {
        defaults.workspace = Some(default_workspace_dir().display().to_string());
    }
    next
}

fn port_validator(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match value.parse::<u16>() {
        Ok(0) => Some("Port must be greater than 0".to_string()),
        Ok(_) => None,
        Err(_) => Some("Enter a port number between 1 and 65535".to_string()),
    }
}

fn bind_validator(value: &str) -> Option<String> {
    if value.is_empty() || value.parse::<GatewayBindMode>().is_ok() {
        None
    } else {
        Some("Enter one of: loopback, lan, auto, custom, tailnet".to_string())
    }
}

fn tailscale_validator(value: &str) -> Option<String> {
    if value.is_empty() || value.parse::<GatewayTailscaleMode>().is_ok() {
        None
    } else {
        Some("Enter one of: off, serve, funnel".to_string())
    }
}

async fn ask_auth_choice(prompt: &dyn Prompt) -> Result<AuthChoice, OnboardingError> {
    let key = prompt
        .text(TextPrompt::new("Anthropic API key (press enter to skip)"))
        .await
        .map_err(OnboardingError::Prompt)?;

    if key.trim().is_empty() {
        return Ok(AuthChoice::Skip);
    }

    Ok(AuthChoice::Provider(ProviderChoice {
        key: "anthropic".to_string(),
        api: crate::config::ModelApi::AnthropicMessages,
        base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
        api_key: Some(key.trim().to_string()),
        default_model: Some(crate::config::DEFAULT_MODEL_ID.to_string()),
    }))
}

async fn ask_gateway_overrides(
    prompt: &dyn Prompt,
    defaults: &QuickstartDefaults,
    mode: OnboardingMode,
) -> Result<GatewayOverrides, OnboardingError> {
    if mode == OnboardingMode::Quickstart {
        return Ok(GatewayOverrides::default());
    }

    let port = prompt
        .text(
            TextPrompt::new("Gateway port")
                .placeholder(defaults.port.to_string())
                .validate(port_validator),
        )
        .await
        .map_err(OnboardingError::Prompt)?;

    let bind = prompt
        .text(
            TextPrompt::new("Bind mode (loopback, lan, auto, custom, tailnet)")
                .placeholder(defaults.bind.to_string())
                .validate(bind_validator),
        )
        .await
        .map_err(OnboardingError::Prompt)?;
    let bind: Option<GatewayBindMode> = bind.parse().ok();

    let custom_bind_host = if bind == Some(GatewayBindMode::Custom) {
        let host = prompt
            .text(
                TextPrompt::new("Custom bind host").validate(|v| {
                    if v.trim().is_empty() {
                        Some("A custom bind mode needs a host".to_string())
                    } else {
                        None
                    }
                }),
            )
            .await
            .map_err(OnboardingError::Prompt)?;
        Some(host.trim().to_string())
    } else {
        None
    };

    let tailscale = prompt
        .text(
            TextPrompt::new("Tailscale exposure (off, serve, funnel)")
                .placeholder(defaults.tailscale_mode.to_string())
                .validate(tailscale_validator),
        )
        .await
        .map_err(OnboardingError::Prompt)?;

    Ok(GatewayOverrides {
        port: port.parse().ok(),
        bind,
        custom_bind_host,
        tailscale_mode: tailscale.parse().ok(),
        ..Default::default()
    })
}

async fn ask_telegram_settings(
    prompt: &dyn Prompt,
) -> Result<Option<ChannelSettings>, OnboardingError> {
    let token = prompt
        .text(TextPrompt::new(
            "Telegram bot token (press enter to skip Telegram)",
        ))
        .await
        .map_err(OnboardingError::Prompt)?;
    let token = token.trim().to_string();
    if token.is_empty() {
        return Ok(None);
    }

    let allow_entry = prompt
        .text(
            TextPrompt::new("Your Telegram user id (DM allowlist)").validate(|v| {
                if v.trim().is_empty() {
                    Some("An allowlist entry is required for DM access".to_string())
                } else {
                    None
                }
            }),
        )
        .await
        .map_err(OnboardingError::Prompt)?;

    Ok(Some(ChannelSettings {
        channel: Channel::Telegram,
        bot_token: Some(token),
        dm_policy: Some(DmPolicy::Allowlist),
        allow_entry: Some(allow_entry.trim().to_string()),
    }))
}

/// Run the onboarding pipeline end to end.
///
/// Returns the persisted configuration. Nothing is written before the
/// first checkpoint, so an interrupted prompt aborts with the stored
/// document untouched.
pub async fn run_onboarding(
    ctx: &OnboardingContext,
    prompt: &dyn Prompt,
) -> Result<Config, OnboardingError> {
    let snapshot = read_config_snapshot(&ctx.config_path);
    if !snapshot.valid {
        return Err(OnboardingError::InvalidConfig {
            path: ctx.config_path.clone(),
            issues: snapshot.issues,
        });
    }

    let defaults = resolve_quickstart_defaults(&snapshot.config);

    prompt.intro("clawgate onboarding").await;
    if defaults.has_existing {
        prompt
            .note(
                &format!(
                    "port {}, bind {}, auth {}, tailscale {}",
                    defaults.port, defaults.bind, defaults.auth_mode, defaults.tailscale_mode
                ),
                "Existing gateway configuration",
            )
            .await;
    }

    let config = ensure_workspace(snapshot.config);

    let choice = ask_auth_choice(prompt).await?;
    let config = apply_auth_choice(config, &choice);

    let overrides = ask_gateway_overrides(prompt, &defaults, ctx.mode).await?;
    let (config, settings) = configure_gateway(config, &defaults, &overrides);
    info!(
        port = settings.port,
        bind = %settings.bind,
        auth = %settings.auth_mode,
        "resolved gateway settings"
    );

    let config = match ask_telegram_settings(prompt).await? {
        Some(channel) => enable_channel(config, &channel),
        None => config,
    };

    write_config(&ctx.config_path, &config)?;

    let config = stamp_wizard_metadata(config, &ctx.command, ctx.mode);
    write_config(&ctx.config_path, &config)?;

    prompt
        .outro(&format!("Configuration written to {}", ctx.config_path.display()))
        .await;

    Ok(config)
}
