pub mod delivery;
pub mod extraction;
pub mod feed;
pub mod payment;

pub use delivery::{TelegramPayload, WebhookPayload};
pub use extraction::{ParseOutcome, PaymentExtractor, RejectReason};
pub use feed::{FeedMessage, MessageStatus};
pub use payment::{PaymentDetails, PaymentDraft, RawMessage};

