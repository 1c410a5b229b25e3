use shared_types::{ParseOutcome, PaymentDraft, RejectReason};

use super::amount::{extract_amount, AmountMatch};
use super::bank::normalize_bank;
use super::date::extract_date;
use super::reference::extract_reference;
use super::sender::extract_sender_name;
use super::vpa::extract_vpa;

/// Raw output of the six field extractors for one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub amount: Option<AmountMatch>,
    pub reference_id: Option<String>,
    pub sender_vpa: Option<String>,
    pub sender_name: Option<String>,
    pub bank: Option<String>,
    pub date_time: Option<String>,
}

impl ExtractedFields {
    /// Runs every extractor against normalized text. The SMS sender address is
    /// only consulted for the bank when the body names none.
    pub fn extract(normalized: &str, sender_address: &str) -> Self {
        let bank = normalize_bank(normalized).or_else(|| normalize_bank(sender_address));

        Self {
            amount: extract_amount(normalized),
            reference_id: extract_reference(normalized),
            sender_vpa: extract_vpa(normalized),
            sender_name: extract_sender_name(normalized),
            bank: bank.map(str::to_string),
            date_time: extract_date(normalized),
        }
    }
}

/// Turns extracted fields into a payment, or the reason there is none
pub fn assemble(fields: ExtractedFields) -> ParseOutcome {
    let Some(amount) = fields.amount else {
        return ParseOutcome::Rejected(RejectReason::NoAmount);
    };

    let draft = PaymentDraft {
        amount: Some(amount.value),
        raw_amount: Some(amount.raw),
        reference_id: fields.reference_id,
        sender_vpa: fields.sender_vpa,
        sender_name: fields.sender_name,
        bank: fields.bank,
        date_time: fields.date_time,
    };

    match draft.build() {
        Some(details) => ParseOutcome::Payment(details),
        None => ParseOutcome::Rejected(RejectReason::Uncorroborated),
    }
}
