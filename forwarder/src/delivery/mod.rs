pub mod telegram;
pub mod webhook;

pub use telegram::TelegramSender;
pub use webhook::WebhookSender;

use async_trait::async_trait;
use shared_types::PaymentDetails;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ForwarderConfig;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A destination for detected payments
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    fn name(&self) -> &str;

    async fn deliver(&self, details: &PaymentDetails, sms_body: &str) -> Result<(), DeliveryError>;
}

/// Result of one channel attempt
#[derive(Debug)]
pub struct DeliveryReport {
    pub channel: String,
    pub result: Result<(), DeliveryError>,
}

impl DeliveryReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Attempts every channel concurrently. One channel failing never stops another.
pub async fn deliver_all(
    channels: &[Arc<dyn DeliveryChannel>],
    details: &PaymentDetails,
    sms_body: &str,
) -> Vec<DeliveryReport> {
    let attempts = channels.iter().map(|channel| async move {
        let result = channel.deliver(details, sms_body).await;
        match &result {
            Ok(()) => tracing::info!("Delivered payment via {}", channel.name()),
            Err(e) => tracing::warn!("Delivery via {} failed: {}", channel.name(), e),
        }
        DeliveryReport {
            channel: channel.name().to_string(),
            result,
        }
    });

    futures::future::join_all(attempts).await
}

/// Builds the configured channels, sharing one HTTP client
pub fn channels_from_config(config: &ForwarderConfig) -> Vec<Arc<dyn DeliveryChannel>> {
    let client = reqwest::Client::new();
    let mut channels: Vec<Arc<dyn DeliveryChannel>> = Vec::new();

    if let Some(url) = config.webhook_url() {
        channels.push(Arc::new(WebhookSender::new(
            client.clone(),
            url,
            config.webhook_secret(),
        )));
    }

    if let Some(telegram) = config.telegram() {
        channels.push(Arc::new(TelegramSender::new(
            client,
            &telegram.bot_token,
            &telegram.chat_id,
        )));
    }

    channels
}

pub(crate) async fn check_status(response: reqwest::Response) -> Result<(), DeliveryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(DeliveryError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TelegramConfig, WebhookConfig};

    #[test]
    fn test_channels_from_config() {
        let config = ForwarderConfig {
            webhook: Some(WebhookConfig {
                url: "https://example.com/hook".to_string(),
                secret_key: Some("key".to_string()),
            }),
            telegram: Some(TelegramConfig {
                bot_token: "123:abc".to_string(),
                chat_id: "42".to_string(),
            }),
            feed: None,
        };

        let names: Vec<String> = channels_from_config(&config)
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["webhook", "telegram"]);
    }

    #[test]
    fn test_no_channels_without_config() {
        assert!(channels_from_config(&ForwarderConfig::default()).is_empty());
    }
}
