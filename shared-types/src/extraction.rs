use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::{PaymentDetails, RawMessage};

/// Core trait implemented by SMS payment extractors
pub trait PaymentExtractor: Send + Sync {
    /// Classify and extract a single message
    fn parse(&self, message: &RawMessage) -> ParseOutcome;

    /// Parse a bare SMS body with no sender context
    fn parse_body(&self, body: &str) -> ParseOutcome {
        self.parse(&RawMessage::new("", body, 0))
    }

    /// Get extractor version for tracking
    fn version(&self) -> String {
        "1.0.0".to_string()
    }
}

/// Terminal state of one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Payment(PaymentDetails),
    Rejected(RejectReason),
}

impl ParseOutcome {
    pub fn into_payment(self) -> Option<PaymentDetails> {
        match self {
            ParseOutcome::Payment(details) => Some(details),
            ParseOutcome::Rejected(_) => None,
        }
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            ParseOutcome::Payment(_) => None,
            ParseOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

/// Why a message did not produce a payment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// Empty or whitespace-only body
    Blank,
    NoPaymentKeyword,
    /// Payment-related but not an inbound credit
    NotReceived,
    NoAmount,
    /// Amount found but no reference, VPA or bank backs it
    Uncorroborated,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Blank => "blank",
            RejectReason::NoPaymentKeyword => "no-payment-keyword",
            RejectReason::NotReceived => "not-received",
            RejectReason::NoAmount => "no-amount",
            RejectReason::Uncorroborated => "uncorroborated",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
