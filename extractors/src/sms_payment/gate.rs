use once_cell::sync::Lazy;
use regex::Regex;
use shared_types::RejectReason;

static PAYMENT_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:credited|debited|paid|transferred|received|sent|upi|imps|neft|rtgs|txn\s+for|otp\s+for)\b",
    )
    .unwrap()
});

static RECEIVED_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:credited|credit(?:\s+of)?|rcvd|received|deposit(?:ed)?|refund(?:ed)?|reversal|reversed)\b|\bcr:",
    )
    .unwrap()
});

static SENT_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:debited|debit|sent|paid|transferred|withdrawn)\b|\bdr:").unwrap()
});

/// Keyword signals of a normalized message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSignals {
    pub has_payment_keyword: bool,
    pub is_received: bool,
    /// Only logged; a message that also reads as received is still inbound
    pub is_sent: bool,
}

impl GateSignals {
    pub fn classify(normalized: &str) -> Self {
        Self {
            has_payment_keyword: has_payment_keyword(normalized),
            is_received: is_received(normalized),
            is_sent: is_sent(normalized),
        }
    }

    /// `Ok(())` when extraction should run, otherwise the rejection cause.
    ///
    /// The payment keyword check runs first: it is the broader filter.
    pub fn verdict(&self) -> Result<(), RejectReason> {
        if !self.has_payment_keyword {
            return Err(RejectReason::NoPaymentKeyword);
        }
        if !self.is_received {
            return Err(RejectReason::NotReceived);
        }
        Ok(())
    }
}

pub fn has_payment_keyword(text: &str) -> bool {
    PAYMENT_KEYWORD.is_match(text)
}

pub fn is_received(text: &str) -> bool {
    RECEIVED_KEYWORD.is_match(text)
}

pub fn is_sent(text: &str) -> bool {
    SENT_KEYWORD.is_match(text)
}
