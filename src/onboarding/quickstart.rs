use crate::config::{
    resolve_gateway_port, Config, GatewayAuthMode, GatewayBindMode, GatewayTailscaleMode,
};

/// Gateway defaults derived from a (possibly absent) prior configuration.
///
/// `has_existing` only shapes how the subsequent prompts are presented;
/// it never changes the resolution itself.
#[derive(Clone, PartialEq, Eq)]
pub struct QuickstartDefaults {
    pub has_existing: bool,
    pub port: u16,
    pub bind: GatewayBindMode,
    pub auth_mode: GatewayAuthMode,
    pub tailscale_mode: GatewayTailscaleMode,
    pub token: Option<String>,
    pub password: Option<String>,
    pub custom_bind_host: Option<String>,
    pub tailscale_reset_on_exit: bool,
}

// Token and password are secrets; keep them out of debug output.
impl std::fmt::Debug for QuickstartDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuickstartDefaults")
            .field("has_existing", &self.has_existing)
            .field("port", &self.port)
            .field("bind", &self.bind)
            .field("auth_mode", &self.auth_mode)
            .field("tailscale_mode", &self.tailscale_mode)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("custom_bind_host", &self.custom_bind_host)
            .field("tailscale_reset_on_exit", &self.tailscale_reset_on_exit)
            .finish()
    }
}

/// Derive gateway defaults from the prior document.
///
/// Pure function, no I/O. Precedence:
/// - bind: prior value when it parses, else loopback
/// - auth mode: explicit valid `auth.mode` wins; otherwise inferred from
///   which secret is present (token before password); otherwise token
/// - tailscale mode: prior value when it parses, else off
/// - port: delegated to the port-resolution helper
pub fn resolve_quickstart_defaults(config: &Config) -> QuickstartDefaults {
    let gateway = &config.gateway;

    let has_existing = gateway.port.is_some()
        || gateway.bind.is_some()
        || gateway.auth.mode.is_some()
        || gateway.auth.token.is_some()
        || gateway.auth.password.is_some()
        || gateway.custom_bind_host.is_some()
        || gateway.tailscale.as_ref().is_some_and(|t| t.mode.is_some());

    let bind = gateway
        .bind
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(GatewayBindMode::Loopback);

    let explicit_mode: Option<GatewayAuthMode> =
        gateway.auth.mode.as_deref().and_then(|s| s.parse().ok());
    let auth_mode = match explicit_mode {
        Some(mode) => mode,
        None if gateway.auth.token.is_some() => GatewayAuthMode::Token,
        None if gateway.auth.password.is_some() => GatewayAuthMode::Password,
        None => GatewayAuthMode::Token,
    };

    let tailscale_mode = gateway
        .tailscale
        .as_ref()
        .and_then(|t| t.mode.as_deref())
        .and_then(|s| s.parse().ok())
        .unwrap_or(GatewayTailscaleMode::Off);

    QuickstartDefaults {
        has_existing,
        port: resolve_gateway_port(gateway.port),
        bind,
        auth_mode,
        tailscale_mode,
        token: gateway.auth.token.clone(),
        password: gateway.auth.password.clone(),
        custom_bind_host: gateway.custom_bind_host.clone(),
        tailscale_reset_on_exit: gateway
            .tailscale
            .as_ref()
            .map(|t| t.reset_on_exit)
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GatewayTailscaleConfig, DEFAULT_GATEWAY_PORT};

    #[test]
    fn empty_document_yields_hard_defaults() {
        let defaults = resolve_quickstart_defaults(&Config::default());
        assert!(!defaults.has_existing);
        assert_eq!(defaults.port, DEFAULT_GATEWAY_PORT);
        assert_eq!(defaults.bind, GatewayBindMode::Loopback);
        assert_eq!(defaults.auth_mode, GatewayAuthMode::Token);
        assert_eq!(defaults.tailscale_mode, GatewayTailscaleMode::Off);
        assert_eq!(defaults.token, None);
        assert_eq!(defaults.password, None);
    }

    #[test]
    fn unknown_bind_normalizes_to_loopback() {
        let mut config = Config::default();
        config.gateway.bind = Some("satellite".to_string());
        let defaults = resolve_quickstart_defaults(&config);
        assert_eq!(defaults.bind, GatewayBindMode::Loopback);
        assert!(defaults.has_existing);
    }

    #[test]
    fn known_bind_is_kept() {
        let mut config = Config::default();
        config.gateway.bind = Some("tailnet".to_string());
        let defaults = resolve_quickstart_defaults(&config);
        assert_eq!(defaults.bind, GatewayBindMode::Tailnet);
    }

    #[test]
    fn token_presence_infers_token_mode() {
        let mut config = Config::default();
        config.gateway.auth.token = Some("tk".to_string());
        let defaults = resolve_quickstart_defaults(&config);
        assert_eq!(defaults.auth_mode, GatewayAuthMode::Token);
        assert_eq!(defaults.token.as_deref(), Some("tk"));
    }

    #[test]
    fn password_presence_infers_password_mode() {
        let mut config = Config::default();
        config.gateway.auth.password = Some("pw".to_string());
        let defaults = resolve_quickstart_defaults(&config);
        assert_eq!(defaults.auth_mode, GatewayAuthMode::Password);
    }

    #[test]
    fn explicit_mode_beats_inferred_mode() {
        let mut config = Config::default();
        config.gateway.auth.mode = Some("password".to_string());
        config.gateway.auth.token = Some("tk".to_string());
        let defaults = resolve_quickstart_defaults(&config);
        assert_eq!(defaults.auth_mode, GatewayAuthMode::Password);
    }

    #[test]
    fn unknown_auth_mode_falls_back_to_inference() {
        let mut config = Config::default();
        config.gateway.auth.mode = Some("mtls".to_string());
        config.gateway.auth.password = Some("pw".to_string());
        let defaults = resolve_quickstart_defaults(&config);
        assert_eq!(defaults.auth_mode, GatewayAuthMode::Password);
    }

    #[test]
    fn unknown_tailscale_mode_is_off() {
        let mut config = Config::default();
        config.gateway.tailscale = Some(GatewayTailscaleConfig {
            mode: Some("relay".to_string()),
            reset_on_exit: true,
        });
        let defaults = resolve_quickstart_defaults(&config);
        assert_eq!(defaults.tailscale_mode, GatewayTailscaleMode::Off);
        assert!(defaults.tailscale_reset_on_exit);
        assert!(defaults.has_existing);
    }

    #[test]
    fn port_marks_existing_config() {
        let mut config = Config::default();
        config.gateway.port = Some(9999);
        let defaults = resolve_quickstart_defaults(&config);
        assert!(defaults.has_existing);
        assert_eq!(defaults.port, 9999);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut config = Config::default();
        config.gateway.auth.token = Some("super-secret".to_string());
        let defaults = resolve_quickstart_defaults(&config);
        let rendered = format!("{defaults:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
