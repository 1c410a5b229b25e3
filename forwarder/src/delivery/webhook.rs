use async_trait::async_trait;
use shared_types::{PaymentDetails, WebhookPayload};

use super::{check_status, DeliveryChannel, DeliveryError};

pub const SIGNATURE_HEADER: &str = "X-My-App-Signature";

/// Posts payment JSON to a user-configured URL
#[derive(Debug, Clone)]
pub struct WebhookSender {
    client: reqwest::Client,
    url: String,
    secret_key: Option<String>,
}

impl WebhookSender {
    pub fn new(client: reqwest::Client, url: &str, secret_key: Option<&str>) -> Self {
        Self {
            client,
            url: url.to_string(),
            secret_key: secret_key.map(str::to_string),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn post_payload(&self, payload: &WebhookPayload) -> Result<(), DeliveryError> {
        let mut request = self.client.post(&self.url).json(payload);
        if let Some(secret_key) = &self.secret_key {
            request = request.header(SIGNATURE_HEADER, secret_key);
        }

        let response = request.send().await?;
        tracing::debug!("Webhook answered {}", response.status());
        check_status(response).await
    }
}

#[async_trait]
impl DeliveryChannel for WebhookSender {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn deliver(&self, details: &PaymentDetails, sms_body: &str) -> Result<(), DeliveryError> {
        self.post_payload(&WebhookPayload::new(details, sms_body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_settings() {
        let sender = WebhookSender::new(
            reqwest::Client::new(),
            "https://example.com/hook",
            Some("s3cret"),
        );

        assert_eq!(sender.url(), "https://example.com/hook");
        assert_eq!(sender.secret_key.as_deref(), Some("s3cret"));
        assert_eq!(sender.name(), "webhook");
    }
}
