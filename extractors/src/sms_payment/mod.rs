//! Received-payment detection for bank SMS.
//!
//! A message is normalized, gated on payment keywords, run through six independent
//! field extractors and finally assembled into a [`PaymentDetails`] when an amount
//! is backed by a reference id, VPA or bank.

mod amount;
mod assembler;
mod bank;
mod date;
mod gate;
mod normalizer;
mod reference;
mod sender;
mod vpa;

pub use amount::{extract_amount, parse_amount, AmountMatch, AmountSource};
pub use assembler::{assemble, ExtractedFields};
pub use bank::{normalize_bank, BANK_ALIASES};
pub use date::extract_date;
pub use gate::{has_payment_keyword, is_received, is_sent, GateSignals};
pub use normalizer::normalize;
pub use reference::extract_reference;
pub use sender::extract_sender_name;
pub use vpa::{extract_vpa, is_vpa};

use shared_types::{ParseOutcome, PaymentDetails, PaymentExtractor, RawMessage, RejectReason};

/// Stateless extractor; all patterns live in process-wide statics
#[derive(Debug, Clone, Copy, Default)]
pub struct SmsPaymentExtractor;

impl SmsPaymentExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_message(&self, message: &RawMessage) -> ParseOutcome {
        let normalized = normalize(&message.body);
        if normalized.is_empty() {
            return ParseOutcome::Rejected(RejectReason::Blank);
        }

        let signals = GateSignals::classify(&normalized);
        if let Err(reason) = signals.verdict() {
            tracing::debug!(sender = %message.sender, %reason, "Gate rejected message");
            return ParseOutcome::Rejected(reason);
        }
        if signals.is_sent {
            tracing::debug!(sender = %message.sender, "Message carries both credit and debit keywords");
        }

        let fields = ExtractedFields::extract(&normalized, &message.sender);
        let outcome = assemble(fields);

        match &outcome {
            ParseOutcome::Payment(details) => tracing::debug!(
                sender = %message.sender,
                amount = %details.amount(),
                reference = details.reference_id().unwrap_or_default(),
                "Parsed received payment"
            ),
            ParseOutcome::Rejected(reason) => {
                tracing::debug!(sender = %message.sender, %reason, "Extraction rejected message")
            }
        }

        outcome
    }
}

impl PaymentExtractor for SmsPaymentExtractor {
    fn parse(&self, message: &RawMessage) -> ParseOutcome {
        self.parse_message(message)
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

/// Parses a bare SMS body; `None` means "not a payment"
pub fn parse_sms(body: &str) -> Option<PaymentDetails> {
    SmsPaymentExtractor::new().parse_body(body).into_payment()
}
