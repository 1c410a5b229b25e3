use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An SMS as handed over by the ingestion side, before any parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct RawMessage {
    /// Originating address, e.g. `VM-HDFCBK`
    pub sender: String,
    pub body: String,
    pub received_at_millis: i64,
}

impl RawMessage {
    pub fn new(sender: impl Into<String>, body: impl Into<String>, received_at_millis: i64) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            received_at_millis,
        }
    }

    /// Merges consecutive parts of a multipart SMS.
    ///
    /// Parts arrive in order; adjacent parts from the same sender are concatenated
    /// and keep the timestamp of the first part.
    pub fn join_parts(parts: Vec<RawMessage>) -> Vec<RawMessage> {
        let mut joined: Vec<RawMessage> = Vec::with_capacity(parts.len());

        for part in parts {
            match joined.last_mut() {
                Some(last) if last.sender == part.sender => last.body.push_str(&part.body),
                _ => joined.push(part),
            }
        }

        joined
    }
}

/// A received payment extracted from an SMS.
///
/// Instances only come out of [`PaymentDraft::build`], so every value carries an
/// amount plus at least one of reference id, VPA or bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[ts(type = "string")]
    amount: Decimal,
    raw_amount: String,
    reference_id: Option<String>,
    sender_vpa: Option<String>,
    sender_name: Option<String>,
    bank: Option<String>,
    date_time: Option<String>,
}

impl PaymentDetails {
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Amount exactly as written in the message, thousands separators included
    pub fn raw_amount(&self) -> &str {
        &self.raw_amount
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.reference_id.as_deref()
    }

    pub fn sender_vpa(&self) -> Option<&str> {
        self.sender_vpa.as_deref()
    }

    pub fn sender_name(&self) -> Option<&str> {
        self.sender_name.as_deref()
    }

    pub fn bank(&self) -> Option<&str> {
        self.bank.as_deref()
    }

    /// `YYYY-MM-DD`
    pub fn date_time(&self) -> Option<&str> {
        self.date_time.as_deref()
    }
}

/// Field values collected by the extractors before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentDraft {
    pub amount: Option<Decimal>,
    pub raw_amount: Option<String>,
    pub reference_id: Option<String>,
    pub sender_vpa: Option<String>,
    pub sender_name: Option<String>,
    pub bank: Option<String>,
    pub date_time: Option<String>,
}

impl PaymentDraft {
    /// True when a corroborating identifier backs the amount
    pub fn is_corroborated(&self) -> bool {
        self.reference_id.is_some() || self.sender_vpa.is_some() || self.bank.is_some()
    }

    /// Returns `None` unless the draft has an amount and is corroborated.
    pub fn build(self) -> Option<PaymentDetails> {
        let draft = Self {
            reference_id: non_blank(self.reference_id),
            sender_vpa: non_blank(self.sender_vpa),
            sender_name: non_blank(self.sender_name),
            bank: non_blank(self.bank),
            date_time: non_blank(self.date_time),
            ..self
        };
        if !draft.is_corroborated() {
            return None;
        }

        let amount = draft.amount?;
        let raw_amount = non_blank(draft.raw_amount).unwrap_or_else(|| amount.to_string());

        Some(PaymentDetails {
            amount,
            raw_amount,
            reference_id: draft.reference_id,
            sender_vpa: draft.sender_vpa,
            sender_name: draft.sender_name,
            bank: draft.bank,
            date_time: draft.date_time,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(value: &str) -> Option<Decimal> {
        Some(Decimal::from_str(value).unwrap())
    }

    #[test]
    fn test_bare_amount_is_not_a_payment() {
        let draft = PaymentDraft {
            amount: amount("50"),
            raw_amount: Some("50".to_string()),
            sender_name: Some("Test User".to_string()),
            ..Default::default()
        };

        assert!(draft.build().is_none());
    }

    #[test]
    fn test_missing_amount_is_not_a_payment() {
        let draft = PaymentDraft {
            reference_id: Some("136056932435".to_string()),
            bank: Some("HDFC Bank".to_string()),
            ..Default::default()
        };

        assert!(draft.build().is_none());
    }

    #[test]
    fn test_build_with_reference() {
        let details = PaymentDraft {
            amount: amount("1000.50"),
            raw_amount: Some("1,000.50".to_string()),
            reference_id: Some("136056932435".to_string()),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert_eq!(details.amount(), Decimal::from_str("1000.50").unwrap());
        assert_eq!(details.raw_amount(), "1,000.50");
        assert_eq!(details.reference_id(), Some("136056932435"));
        assert_eq!(details.bank(), None);
    }

    #[test]
    fn test_build_defaults_raw_amount() {
        let details = PaymentDraft {
            amount: amount("10.37"),
            bank: Some("Kotak Mahindra Bank".to_string()),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert_eq!(details.raw_amount(), "10.37");
    }

    #[test]
    fn test_serializes_camel_case() {
        let details = PaymentDraft {
            amount: amount("10.37"),
            raw_amount: Some("10.37".to_string()),
            sender_vpa: Some("test@upi".to_string()),
            date_time: Some("2025-08-31".to_string()),
            ..Default::default()
        }
        .build()
        .unwrap();

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["amount"], "10.37");
        assert_eq!(json["senderVpa"], "test@upi");
        assert_eq!(json["dateTime"], "2025-08-31");
        assert!(json["referenceId"].is_null());
    }

    #[test]
    fn test_join_parts() {
        let parts = vec![
            RawMessage::new("VM-KOTAKB", "Received Rs.10.37 in your ", 1),
            RawMessage::new("VM-KOTAKB", "Kotak Bank AC X2052", 2),
            RawMessage::new("AX-HDFCBK", "Update", 3),
        ];

        let joined = RawMessage::join_parts(parts);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].body, "Received Rs.10.37 in your Kotak Bank AC X2052");
        assert_eq!(joined[0].received_at_millis, 1);
        assert_eq!(joined[1].sender, "AX-HDFCBK");
    }
}
