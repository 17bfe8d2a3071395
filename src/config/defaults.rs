//! Default configuration constants used across the system.

use std::path::PathBuf;

/// Default gateway port.
pub const DEFAULT_GATEWAY_PORT: u16 = 18789;

/// Default model seeded for a fresh provider entry.
pub const DEFAULT_MODEL_ID: &str = "claude-sonnet-4-6";

/// Display name for the default model descriptor.
pub const DEFAULT_MODEL_NAME: &str = "Claude Sonnet";

/// Default provider key seeded when the provider map is empty.
pub const DEFAULT_PROVIDER_KEY: &str = "anthropic";

/// Base URL for the default provider.
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.anthropic.com";

/// Resolve the gateway port from an optional prior value.
///
/// This is the port-resolution collaborator: it owns the default and the
/// rest of the engine treats the result as an opaque integer.
pub fn resolve_gateway_port(prior: Option<u16>) -> u16 {
    prior.unwrap_or(DEFAULT_GATEWAY_PORT)
}

/// Well-known agent workspace directory, used when no workspace is set.
pub fn default_workspace_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".clawgate").join("workspace"))
        .unwrap_or_else(|| PathBuf::from(".clawgate/workspace"))
}
