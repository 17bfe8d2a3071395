use crate::config::{ChannelConfig, Config, DmPolicy};
use crate::plugins::enable_plugin_in_config;

/// Built-in channels the onboarding flow can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Telegram,
    Discord,
    Slack,
    Signal,
    IMessage,
}

impl Channel {
    /// Stable identifier, also the plugin id activated for this channel.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::Discord => "discord",
            Self::Slack => "slack",
            Self::Signal => "signal",
            Self::IMessage => "imessage",
        }
    }

}

/// Settings to merge when activating one channel.
#[derive(Debug, Clone)]
pub struct ChannelSettings {
    pub channel: Channel,
    pub bot_token: Option<String>,
    pub dm_policy: Option<DmPolicy>,
    /// Sender identifier to add to the allowlist (user id, phone number).
    pub allow_entry: Option<String>,
}

/// Merge one identifier into an allowlist.
///
/// Existing entries are trimmed, blanks dropped, duplicates removed with
/// first occurrence winning; the new identifier is appended only when not
/// already present. Running this twice with the same identifier is a no-op
/// on the second run.
pub fn merge_allow_from(existing: Option<&[String]>, entry: &str) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for item in existing.unwrap_or_default() {
        let trimmed = item.trim();
        if trimmed.is_empty() || merged.iter().any(|m| m == trimmed) {
            continue;
        }
        merged.push(trimmed.to_string());
    }

    let entry = entry.trim();
    if !entry.is_empty() && !merged.iter().any(|m| m == entry) {
        merged.push(entry.to_string());
    }

    merged
}

fn channel_config_mut<'a>(config: &'a mut Config, channel: Channel) -> &'a mut ChannelConfig {
    match channel {
        Channel::Telegram => &mut config.channels.telegram,
        Channel::Discord => &mut config.channels.discord,
        Channel::Slack => &mut config.channels.slack,
        Channel::Signal => &mut config.channels.signal,
        Channel::IMessage => &mut config.channels.imessage,
    }
}

/// Activate one channel: merge its settings and enable its plugin.
///
/// A bot token already present in the document is never overwritten.
pub fn enable_channel(config: Config, settings: &ChannelSettings) -> Config {
    let mut next = config;

    {
        let channel = channel_config_mut(&mut next, settings.channel);
        channel.enabled = Some(true);

        if let Some(token) = &settings.bot_token {
            channel.apply_token(token);
        }
        if let Some(policy) = settings.dm_policy {
            channel.dm_policy = Some(policy);
        }
        if let Some(entry) = &settings.allow_entry {
            let merged = merge_allow_from(channel.allow_from.as_deref(), entry);
            channel.allow_from = Some(merged);
        }
    }

    enable_plugin_in_config(next, settings.channel.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn telegram_settings(entry: &str) -> ChannelSettings {
        ChannelSettings {
            channel: Channel::Telegram,
            bot_token: Some("123:abc".to_string()),
            dm_policy: Some(DmPolicy::Allowlist),
            allow_entry: Some(entry.to_string()),
        }
    }

    #[test]
    fn merge_into_empty_allowlist() {
        assert_eq!(merge_allow_from(None, "123456789"), vec!["123456789"]);
    }

    #[test]
    fn merge_is_idempotent() {
        let once = merge_allow_from(None, "42");
        let twice = merge_allow_from(Some(&once), "42");
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_preserves_order_and_drops_blanks() {
        let existing = vec![
            " a ".to_string(),
            String::new(),
            "b".to_string(),
            "a".to_string(),
        ];
        assert_eq!(merge_allow_from(Some(&existing), "c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn merge_trims_the_new_entry() {
        assert_eq!(merge_allow_from(None, "  7  "), vec!["7"]);
        let existing = vec!["7".to_string()];
        assert_eq!(merge_allow_from(Some(&existing), " 7"), vec!["7"]);
    }

    #[test]
    fn blank_entry_is_never_added() {
        assert!(merge_allow_from(None, "   ").is_empty());
    }

    #[test]
    fn enabling_telegram_from_scratch() {
        let config = enable_channel(Config::default(), &telegram_settings("123456789"));

        let telegram = &config.channels.telegram;
        assert_eq!(telegram.enabled, Some(true));
        assert_eq!(telegram.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(telegram.dm_policy, Some(DmPolicy::Allowlist));
        assert_eq!(telegram.allow_from.as_deref(), Some(&["123456789".to_string()][..]));
        assert!(config.plugins.contains("telegram"));
    }

    #[test]
    fn reenabling_is_a_no_op() {
        let settings = telegram_settings("1");
        let mut prior = Config::default();
        prior.channels.telegram.allow_from = Some(vec!["1".to_string()]);

        let config = enable_channel(prior, &settings);
        let config = enable_channel(config, &settings);

        assert_eq!(
            config.channels.telegram.allow_from.as_deref(),
            Some(&["1".to_string()][..])
        );
        assert_eq!(config.plugins.entries, vec!["telegram"]);
    }

    #[test]
    fn existing_bot_token_is_kept() {
        let mut prior = Config::default();
        prior.channels.telegram.bot_token = Some("original".to_string());

        let config = enable_channel(prior, &telegram_settings("9"));
        assert_eq!(
            config.channels.telegram.bot_token.as_deref(),
            Some("original")
        );
    }

    #[test]
    fn other_channels_are_untouched() {
        let config = enable_channel(Config::default(), &telegram_settings("5"));
        assert_eq!(config.channels.discord, ChannelConfig::default());
        assert_eq!(config.channels.slack.enabled, None);
    }
}
