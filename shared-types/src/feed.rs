use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::RawMessage;

/// Outcome recorded for every inbound SMS in the message feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Submitted,
    #[serde(alias = "INVALID", alias = "INVALID_FORMAT")]
    Ignored,
    NoForwarderSet,
    WebhookNotSet,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Submitted => "SUBMITTED",
            MessageStatus::Ignored => "IGNORED",
            MessageStatus::NoForwarderSet => "NO_FORWARDER_SET",
            MessageStatus::WebhookNotSet => "WEBHOOK_NOT_SET",
        }
    }

    /// Status strings written by older builds that load as [`MessageStatus::Ignored`]
    pub fn is_legacy(raw: &str) -> bool {
        matches!(raw, "INVALID" | "INVALID_FORMAT")
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUBMITTED" => Ok(MessageStatus::Submitted),
            "IGNORED" | "INVALID" | "INVALID_FORMAT" => Ok(MessageStatus::Ignored),
            "NO_FORWARDER_SET" => Ok(MessageStatus::NoForwarderSet),
            "WEBHOOK_NOT_SET" => Ok(MessageStatus::WebhookNotSet),
            other => Err(format!("Unknown message status: {other}")),
        }
    }
}

/// One entry of the persisted message feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct FeedMessage {
    pub sender: String,
    /// Full raw SMS text
    #[serde(rename = "body")]
    #[serde(alias = "content")]
    pub content: String,
    pub status: MessageStatus,
    /// Epoch millis, kept as a string to match the stored schema
    #[serde(alias = "date")]
    pub timestamp: String,
}

impl FeedMessage {
    pub fn new(
        sender: impl Into<String>,
        content: impl Into<String>,
        status: MessageStatus,
        timestamp_millis: i64,
    ) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            status,
            timestamp: timestamp_millis.to_string(),
        }
    }

    pub fn from_raw(message: &RawMessage, status: MessageStatus) -> Self {
        Self::new(
            message.sender.clone(),
            message.body.clone(),
            status,
            message.received_at_millis,
        )
    }

    pub fn timestamp_millis(&self) -> Option<i64> {
        self.timestamp.parse().ok()
    }
}
