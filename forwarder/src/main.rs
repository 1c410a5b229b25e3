use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use clap::{ArgGroup, Parser, Subcommand};
use extractors::SmsPaymentExtractor;
use forwarder::delivery::WebhookSender;
use forwarder::{Forwarder, ForwarderConfig, IngestResult};
use shared_types::{FeedMessage, ParseOutcome, PaymentExtractor, RawMessage, WebhookPayload};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

const SAMPLE_SENDER: &str = "+919741430392";
const SAMPLE_SMS: &str = "Your a/c is credited with Rs10.99 on 31-08-2025 from Test User with VPA test@upi UPI Ref No 123456789012";

#[derive(Parser, Debug)]
#[command(name = "paytrack", author, version, about = "Detect received payments in bank SMS and forward them")]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one SMS and print the extracted payment
    Parse {
        /// SMS text; read from stdin when omitted
        body: Option<String>,

        /// Originating address, used as bank context
        #[arg(long, default_value = "")]
        sender: String,
    },

    /// Process SMS through the forwarder and record them in the feed
    #[command(group(
        ArgGroup::new("input")
            .required(true)
            .args(["body", "file"]),
    ))]
    Ingest {
        #[arg(long, group = "input")]
        body: Option<String>,

        /// JSON array of `{sender, body, received_at_millis}` parts
        #[arg(long, value_name = "PATH", group = "input")]
        file: Option<PathBuf>,

        #[arg(long, default_value = "")]
        sender: String,

        /// Epoch millis; defaults to now
        #[arg(long)]
        timestamp: Option<i64>,
    },

    /// Show the message feed, newest first
    Feed {
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Remove every entry
        #[arg(long)]
        clear: bool,
    },

    /// Post a sample payment to the configured webhook
    TestWebhook,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file_path.as_deref());

    let load_config = || -> Result<ForwarderConfig> {
        match &args.config {
            Some(path) => ForwarderConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {:?}", path)),
            None => {
                let (config, path) = ForwarderConfig::load().context("Failed to load config")?;
                tracing::debug!("Loaded config from {:?}", path);
                Ok(config)
            }
        }
    };

    let extractor: Arc<dyn PaymentExtractor> = Arc::new(SmsPaymentExtractor::new());

    match &args.command {
        Command::Parse { body, sender } => {
            let body = match body {
                Some(body) => body.clone(),
                None => read_stdin()?,
            };
            match extractor.parse(&RawMessage::new(sender.as_str(), body, now_millis())) {
                ParseOutcome::Payment(details) => {
                    println!("{}", serde_json::to_string_pretty(&details)?);
                }
                ParseOutcome::Rejected(reason) => println!("Not a payment: {}", reason),
            }
        }
        Command::Ingest {
            body,
            file,
            sender,
            timestamp,
        } => {
            let config = load_config()?;
            let forwarder = Forwarder::from_config(extractor, &config);

            let parts = match (body, file) {
                (Some(body), _) => vec![RawMessage::new(
                    sender.as_str(),
                    body.as_str(),
                    timestamp.unwrap_or_else(now_millis),
                )],
                (None, Some(path)) => {
                    let raw = std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {:?}", path))?;
                    serde_json::from_str(&raw)
                        .with_context(|| format!("Invalid message list in {:?}", path))?
                }
                (None, None) => anyhow::bail!("Either --body or --file is required"),
            };

            for result in forwarder.process_all(parts).await? {
                print_result(&result);
            }
        }
        Command::Feed { limit, clear } => {
            let config = load_config()?;
            let forwarder = Forwarder::from_config(extractor, &config);

            if *clear {
                forwarder.feed().clear()?;
                println!("Cleared {}", forwarder.feed().path().display());
                return Ok(());
            }

            let messages = forwarder.feed().load()?;
            if messages.is_empty() {
                println!("No messages yet");
            }
            for message in messages.iter().take(*limit) {
                print_feed_entry(message);
            }
        }
        Command::TestWebhook => {
            let config = load_config()?;
            let url = config
                .webhook_url()
                .ok_or_else(|| anyhow::anyhow!("Webhook URL cannot be empty for testing"))?;

            let details = extractor
                .parse(&RawMessage::new(SAMPLE_SENDER, SAMPLE_SMS, now_millis()))
                .into_payment()
                .context("Sample message did not parse as a payment")?;

            let sender = WebhookSender::new(reqwest::Client::new(), url, config.webhook_secret());
            sender
                .post_payload(&WebhookPayload::new(&details, SAMPLE_SMS))
                .await
                .with_context(|| format!("Test webhook to {} failed", url))?;
            println!("Test payment delivered to {}", url);
        }
    }

    Ok(())
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("paytrack.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn read_stdin() -> Result<String> {
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("Failed to read SMS from stdin")?;
    Ok(body)
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn print_result(result: &IngestResult) {
    println!("{:<18} {}", result.entry.status.as_str(), result.entry.sender);
    for report in &result.deliveries {
        match &report.result {
            Ok(()) => println!("  {} ok", report.channel),
            Err(e) => println!("  {} failed: {}", report.channel, e),
        }
    }
}

fn print_feed_entry(message: &FeedMessage) {
    let when = message
        .timestamp_millis()
        .and_then(|millis| Local.timestamp_millis_opt(millis).single())
        .map(|time| time.format("%b %d, %Y %H:%M").to_string())
        .unwrap_or_else(|| message.timestamp.clone());

    println!("{}  {:<18} {}", when, message.status.as_str(), message.sender);
    println!("  {}", message.content);
}
