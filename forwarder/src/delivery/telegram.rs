use async_trait::async_trait;
use serde::Serialize;
use shared_types::{PaymentDetails, TelegramPayload};

use super::{check_status, DeliveryChannel, DeliveryError};

pub const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org/bot";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

/// Sends payment JSON as a preformatted Telegram chat message
#[derive(Debug, Clone)]
pub struct TelegramSender {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramSender {
    pub fn new(client: reqwest::Client, bot_token: &str, chat_id: &str) -> Self {
        Self {
            client,
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}/sendMessage", TELEGRAM_API_BASE_URL, self.bot_token)
    }
}

/// Pretty JSON, HTML-escaped and wrapped in `<pre>`
pub fn format_message(payload: &TelegramPayload) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(payload)?;
    Ok(format!("<pre>{}</pre>", escape_html(&json)))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[async_trait]
impl DeliveryChannel for TelegramSender {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn deliver(&self, details: &PaymentDetails, sms_body: &str) -> Result<(), DeliveryError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text: format_message(&TelegramPayload::new(details, sms_body))?,
            parse_mode: "HTML",
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await?;
        check_status(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared_types::PaymentDraft;

    fn details() -> PaymentDetails {
        PaymentDraft {
            amount: Some(Decimal::new(1099, 2)),
            raw_amount: Some("10.99".to_string()),
            reference_id: Some("123456789012".to_string()),
            bank: Some("HDFC Bank".to_string()),
            date_time: Some("2025-08-31".to_string()),
            ..Default::default()
        }
        .build()
        .unwrap()
    }

    #[test]
    fn test_endpoint() {
        let sender = TelegramSender::new(reqwest::Client::new(), "123:abc", "42");
        assert_eq!(
            sender.endpoint(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_format_message_wraps_and_escapes() {
        let payload = TelegramPayload::new(&details(), "Rs 10.99 <credited> & done");
        let text = format_message(&payload).unwrap();

        assert!(text.starts_with("<pre>{"));
        assert!(text.ends_with("}</pre>"));
        assert!(text.contains("&lt;credited&gt; &amp; done"));
        assert!(text.contains("\"bank\": \"HDFC Bank\""));
        assert!(text.contains("\"dateTime\": \"2025-08-31\""));
        assert!(!text.contains("sender_vpa"));
    }

    #[test]
    fn test_request_body() {
        let request = SendMessageRequest {
            chat_id: "42",
            text: "<pre>{}</pre>".to_string(),
            parse_mode: "HTML",
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["chat_id"], "42");
        assert_eq!(json["parse_mode"], "HTML");
        assert_eq!(json["text"], "<pre>{}</pre>");
    }
}
