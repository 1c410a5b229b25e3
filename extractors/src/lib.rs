//! Extractors Crate
//!
//! This crate turns free-form bank SMS text into structured payment records.
//!
//! # Architecture
//!
//! - **Types**: Record types and the `PaymentExtractor` trait live in the `shared-types` crate
//! - **Implementations**: The SMS classification and field extraction engine lives here
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::SmsPaymentExtractor;
//! use shared_types::{PaymentExtractor, RawMessage};
//!
//! let extractor = SmsPaymentExtractor::new();
//! let outcome = extractor.parse(&RawMessage::new("VM-KOTAKB", body, received_at));
//! ```

pub mod sms_payment;

// Re-export commonly used items
pub use sms_payment::{normalize, normalize_bank, parse_sms, SmsPaymentExtractor};

// Re-export the extractor trait from shared-types for convenience
pub use shared_types::PaymentExtractor;
