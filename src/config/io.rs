use anyhow::{bail, Context, Result};
use std::path::Path;

/// Maximum size for a config file (10 MB).
pub const MAX_CONFIG_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Parse a JSON5 configuration string.
pub fn parse_config_json5(content: &str) -> Result<serde_json::Value> {
    let value: serde_json::Value = json5::from_str(content)?;
    Ok(value)
}

/// Read a configuration file into a raw JSON value.
///
/// Format is dispatched on extension: YAML and TOML are supported for
/// hand-written configs, everything else goes through the JSON5 parser
/// (which accepts plain JSON).
pub fn read_config_file_raw(path: &Path) -> Result<serde_json::Value> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot stat config file '{}'", path.display()))?;

    if metadata.len() > MAX_CONFIG_FILE_BYTES {
        bail!(
            "Config file '{}' is {} bytes, exceeds limit of {} bytes",
            path.display(),
            metadata.len(),
            MAX_CONFIG_FILE_BYTES,
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match ext {
        "yaml" | "yml" => {
            let value: serde_json::Value = serde_yaml::from_str(&content)?;
            Ok(value)
        }
        "toml" => {
            let value: serde_json::Value = toml::from_str(&content)?;
            Ok(value)
        }
        _ => parse_config_json5(&content),
    }
}

/// Serialize a config value to pretty JSON.
pub fn render_config_json(config: &serde_json::Value) -> Result<String> {
    let content = serde_json::to_string_pretty(config)?;
    Ok(content)
}
