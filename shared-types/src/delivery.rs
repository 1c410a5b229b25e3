use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PaymentDetails;

/// JSON body posted to the configured webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct WebhookPayload {
    pub amount_received: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub upi_ref_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sender_vpa: Option<String>,
    pub full_sms_body: String,
}

impl WebhookPayload {
    pub fn new(details: &PaymentDetails, full_sms_body: &str) -> Self {
        Self {
            amount_received: details.amount().to_string(),
            upi_ref_id: details.reference_id().map(str::to_string),
            sender_name: details.sender_name().map(str::to_string),
            sender_vpa: details.sender_vpa().map(str::to_string),
            full_sms_body: full_sms_body.to_string(),
        }
    }
}

/// Fields rendered into the Telegram message text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct TelegramPayload {
    pub amount_received: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub upi_ref_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sender_vpa: Option<String>,
    pub full_sms_body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub bank: Option<String>,
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub date_time: Option<String>,
}

impl TelegramPayload {
    pub fn new(details: &PaymentDetails, full_sms_body: &str) -> Self {
        let webhook = WebhookPayload::new(details, full_sms_body);
        Self {
            amount_received: webhook.amount_received,
            upi_ref_id: webhook.upi_ref_id,
            sender_name: webhook.sender_name,
            sender_vpa: webhook.sender_vpa,
            full_sms_body: webhook.full_sms_body,
            bank: details.bank().map(str::to_string),
            date_time: details.date_time().map(str::to_string),
        }
    }
}
