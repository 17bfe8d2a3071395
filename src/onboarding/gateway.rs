use rand::RngCore;

use crate::config::{
    Config, GatewayAuthConfig, GatewayAuthMode, GatewayBindMode, GatewayTailscaleConfig,
    GatewayTailscaleMode,
};

use super::quickstart::QuickstartDefaults;

/// Explicit user overrides layered on top of the resolved defaults.
/// Absent fields keep the default value.
#[derive(Clone, Default)]
pub struct GatewayOverrides {
    pub port: Option<u16>,
    pub bind: Option<GatewayBindMode>,
    pub auth_mode: Option<GatewayAuthMode>,
    pub token: Option<String>,
    pub password: Option<String>,
    pub custom_bind_host: Option<String>,
    pub tailscale_mode: Option<GatewayTailscaleMode>,
    pub tailscale_reset_on_exit: Option<bool>,
}

/// The resolved runtime-facing gateway configuration.
///
/// The external gateway process consumes this to bind its listener and
/// enforce the chosen auth mode; this engine only computes it.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    pub port: u16,
    pub bind: GatewayBindMode,
    pub custom_bind_host: Option<String>,
    pub auth_mode: GatewayAuthMode,
    pub token: Option<String>,
    pub password: Option<String>,
    pub tailscale_mode: GatewayTailscaleMode,
    pub tailscale_reset_on_exit: bool,
}

// Token and password are secrets; keep them out of debug output.
impl std::fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("port", &self.port)
            .field("bind", &self.bind)
            .field("custom_bind_host", &self.custom_bind_host)
            .field("auth_mode", &self.auth_mode)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("tailscale_mode", &self.tailscale_mode)
            .field("tailscale_reset_on_exit", &self.tailscale_reset_on_exit)
            .finish()
    }
}

/// Mint a random gateway token (32 bytes from the OS RNG, hex-encoded).
pub fn generate_gateway_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Combine resolved defaults, explicit overrides, and the base document
/// into final gateway settings, and fold them into `gateway`.
///
/// Pure merge apart from token minting: when the merged auth mode is token
/// and no token exists anywhere, a fresh one is generated so the gateway
/// never starts unauthenticated. `customBindHost` is retained only when
/// the merged bind mode is custom.
pub fn configure_gateway(
    config: Config,
    defaults: &QuickstartDefaults,
    overrides: &GatewayOverrides,
) -> (Config, GatewaySettings) {
    let bind = overrides.bind.unwrap_or(defaults.bind);
    let auth_mode = overrides.auth_mode.unwrap_or(defaults.auth_mode);

    let custom_bind_host = if bind == GatewayBindMode::Custom {
        overrides
            .custom_bind_host
            .clone()
            .or_else(|| defaults.custom_bind_host.clone())
    } else {
        None
    };

    let mut token = overrides.token.clone().or_else(|| defaults.token.clone());
    if auth_mode == GatewayAuthMode::Token && token.is_none() {
        token = Some(generate_gateway_token());
    }
    let password = overrides
        .password
        .clone()
        .or_else(|| defaults.password.clone());

    let settings = GatewaySettings {
        port: overrides.port.unwrap_or(defaults.port),
        bind,
        custom_bind_host,
        auth_mode,
        token,
        password,
        tailscale_mode: overrides.tailscale_mode.unwrap_or(defaults.tailscale_mode),
        tailscale_reset_on_exit: overrides
            .tailscale_reset_on_exit
            .unwrap_or(defaults.tailscale_reset_on_exit),
    };

    let mut next = config;
    next.gateway.mode = Some("local".to_string());
    next.gateway.port = Some(settings.port);
    next.gateway.bind = Some(settings.bind.to_string());
    next.gateway.custom_bind_host = settings.custom_bind_host.clone();
    next.gateway.auth = GatewayAuthConfig {
        mode: Some(settings.auth_mode.to_string()),
        token: settings.token.clone(),
        password: settings.password.clone(),
    };
    next.gateway.tailscale = Some(GatewayTailscaleConfig {
        mode: Some(settings.tailscale_mode.to_string()),
        reset_on_exit: settings.tailscale_reset_on_exit,
    });

    (next, settings)
}
