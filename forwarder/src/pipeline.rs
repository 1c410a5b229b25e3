use anyhow::{Context, Result};
use shared_types::{FeedMessage, MessageStatus, PaymentDetails, PaymentExtractor, RawMessage};
use std::sync::Arc;

use crate::config::ForwarderConfig;
use crate::delivery::{channels_from_config, deliver_all, DeliveryChannel, DeliveryReport};
use crate::feed::FeedStore;

/// Feed status for a parsed message given which channels are available
pub fn resolve_status(
    is_payment: bool,
    channel_count: usize,
    webhook_missing_url: bool,
) -> MessageStatus {
    if !is_payment {
        return MessageStatus::Ignored;
    }

    match channel_count {
        0 if webhook_missing_url => MessageStatus::WebhookNotSet,
        0 => MessageStatus::NoForwarderSet,
        _ => MessageStatus::Submitted,
    }
}

#[derive(Debug)]
pub struct IngestResult {
    pub entry: FeedMessage,
    pub payment: Option<PaymentDetails>,
    pub deliveries: Vec<DeliveryReport>,
}

/// Parses inbound SMS, forwards payments and records every message in the feed
pub struct Forwarder {
    extractor: Arc<dyn PaymentExtractor>,
    channels: Vec<Arc<dyn DeliveryChannel>>,
    feed: FeedStore,
    webhook_missing_url: bool,
}

impl Forwarder {
    pub fn new(
        extractor: Arc<dyn PaymentExtractor>,
        channels: Vec<Arc<dyn DeliveryChannel>>,
        feed: FeedStore,
    ) -> Self {
        tracing::info!(
            "Forwarder using extractor v{} with {} channel(s)",
            extractor.version(),
            channels.len()
        );
        Self {
            extractor,
            channels,
            feed,
            webhook_missing_url: false,
        }
    }

    pub fn from_config(extractor: Arc<dyn PaymentExtractor>, config: &ForwarderConfig) -> Self {
        let feed = FeedStore::new(config.feed_path(), config.feed_max_entries());
        let mut forwarder = Self::new(extractor, channels_from_config(config), feed);
        forwarder.webhook_missing_url = config.webhook_missing_url();
        forwarder
    }

    pub fn feed(&self) -> &FeedStore {
        &self.feed
    }

    pub async fn process(&self, message: &RawMessage) -> Result<IngestResult> {
        let outcome = self.extractor.parse(message);
        if let Some(reason) = outcome.reject_reason() {
            tracing::info!("Ignoring message from {}: {}", message.sender, reason);
        }
        let payment = outcome.into_payment();

        let status = resolve_status(
            payment.is_some(),
            self.channels.len(),
            self.webhook_missing_url,
        );

        let deliveries = match (&payment, status) {
            (Some(details), MessageStatus::Submitted) => {
                deliver_all(&self.channels, details, &message.body).await
            }
            (Some(_), status) => {
                tracing::warn!("Payment from {} not forwarded: {}", message.sender, status);
                Vec::new()
            }
            (None, _) => Vec::new(),
        };

        let entry = FeedMessage::from_raw(message, status);
        self.feed
            .prepend(entry.clone())
            .with_context(|| format!("Failed to record message from {}", message.sender))?;

        Ok(IngestResult {
            entry,
            payment,
            deliveries,
        })
    }

    /// Joins multipart messages and processes them in arrival order
    pub async fn process_all(&self, parts: Vec<RawMessage>) -> Result<Vec<IngestResult>> {
        let mut results = Vec::new();
        for message in RawMessage::join_parts(parts) {
            results.push(self.process(&message).await?);
        }
        Ok(results)
    }
}
