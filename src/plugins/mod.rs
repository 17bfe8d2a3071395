//! Plugin activation helpers.
//!
//! The configuration document carries a set of enabled plugin identifiers,
//! one per active channel. The gateway process loads the matching plugin
//! for every identifier at startup; this module only maintains the set.

use crate::config::Config;

/// Add a plugin identifier to the enabled set.
///
/// Purely additive and idempotent: the identifier is appended only when
/// absent, existing entries keep their order, and the input document is
/// never mutated.
pub fn enable_plugin_in_config(config: Config, plugin_id: &str) -> Config {
    let mut next = config;
    if !next.plugins.contains(plugin_id) {
        next.plugins.entries.push(plugin_id.to_string());
    }
    next
}
