use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_MAX_FEED_ENTRIES: usize = 500;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ForwarderConfig {
    pub webhook: Option<WebhookConfig>,
    pub telegram: Option<TelegramConfig>,
    pub feed: Option<FeedConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct WebhookConfig {
    #[serde(default)]
    pub url: String,
    /// Sent as the `X-My-App-Signature` header
    pub secret_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FeedConfig {
    pub path: Option<String>,
    pub max_entries: Option<usize>,
}

impl ForwarderConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        // Create default config file if it doesn't exist
        if !config_path.exists() {
            let default_config = r#"
# [webhook]
# url = "https://example.com/payments"
# secret_key = "shared-secret"

# [telegram]
# bot_token = "123456:ABC-DEF"
# chat_id = "-1001234567890"

# [feed]
# path = "/path/to/feed.json"
# max_entries = 500
"#;
            std::fs::write(config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .add_source(Environment::with_prefix("PAYTRACK").separator("__"))
            .build()?;

        builder.try_deserialize()
    }

    /// Webhook URL when one is configured and non-blank
    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook
            .as_ref()
            .map(|w| w.url.trim())
            .filter(|url| !url.is_empty())
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook
            .as_ref()
            .and_then(|w| w.secret_key.as_deref())
            .filter(|key| !key.is_empty())
    }

    /// Telegram settings when both token and chat id are present
    pub fn telegram(&self) -> Option<&TelegramConfig> {
        self.telegram
            .as_ref()
            .filter(|t| !t.bot_token.trim().is_empty() && !t.chat_id.trim().is_empty())
    }

    /// A `[webhook]` section exists but carries no URL
    pub fn webhook_missing_url(&self) -> bool {
        self.webhook.is_some() && self.webhook_url().is_none()
    }

    pub fn has_forwarder(&self) -> bool {
        self.webhook_url().is_some() || self.telegram().is_some()
    }

    pub fn feed_path(&self) -> PathBuf {
        if let Some(path) = self.feed.as_ref().and_then(|f| f.path.as_ref()) {
            return PathBuf::from(path);
        }

        if let Some(data_dir) = dirs::data_local_dir() {
            data_dir.join("paytrack").join("feed.json")
        } else {
            PathBuf::from("feed.json")
        }
    }

    pub fn feed_max_entries(&self) -> usize {
        self.feed
            .as_ref()
            .and_then(|f| f.max_entries)
            .unwrap_or(DEFAULT_MAX_FEED_ENTRIES)
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("paytrack").join("forwarder.toml")
    } else {
        PathBuf::from("forwarder.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("forwarder.toml");

        let config = ForwarderConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert!(config.webhook.is_none());
        assert!(!config.has_forwarder());
        assert_eq!(config.feed_max_entries(), 500);
    }

    #[test]
    fn test_reads_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forwarder.toml");
        std::fs::write(
            &path,
            r#"
[webhook]
url = "https://example.com/hook"
secret_key = "s3cret"

[telegram]
bot_token = "123:abc"
chat_id = "42"

[feed]
path = "/tmp/paytrack-feed.json"
max_entries = 10
"#,
        )
        .unwrap();

        let config = ForwarderConfig::load_from(&path).unwrap();

        assert_eq!(config.webhook_url(), Some("https://example.com/hook"));
        assert_eq!(config.webhook_secret(), Some("s3cret"));
        assert_eq!(config.telegram().map(|t| t.chat_id.as_str()), Some("42"));
        assert_eq!(config.feed_path(), PathBuf::from("/tmp/paytrack-feed.json"));
        assert_eq!(config.feed_max_entries(), 10);
        assert!(config.has_forwarder());
    }

    #[test]
    fn test_blank_webhook_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forwarder.toml");
        std::fs::write(&path, "[webhook]\nurl = \"  \"\n").unwrap();

        let config = ForwarderConfig::load_from(&path).unwrap();

        assert!(config.webhook_missing_url());
        assert!(!config.has_forwarder());
    }

    #[test]
    fn test_incomplete_telegram_is_ignored() {
        let config = ForwarderConfig {
            telegram: Some(TelegramConfig {
                bot_token: "123:abc".to_string(),
                chat_id: String::new(),
            }),
            ..Default::default()
        };

        assert!(config.telegram().is_none());
        assert!(!config.has_forwarder());
    }
}
