//! SMS payment forwarder
//!
//! Runs inbound SMS through the extraction engine, delivers detected payments to the
//! configured webhook and Telegram chat, and keeps a capped message feed on disk.

pub mod config;
pub mod delivery;
pub mod feed;
pub mod pipeline;

pub use config::ForwarderConfig;
pub use delivery::{DeliveryChannel, DeliveryError, DeliveryReport};
pub use feed::{FeedError, FeedStore};
pub use pipeline::{resolve_status, Forwarder, IngestResult};
