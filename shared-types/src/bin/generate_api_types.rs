use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Record model shared with the feed viewer
    let mut types = Vec::new();

    // Payment types
    types.push(clean_type(RawMessage::export_to_string()?));
    types.push(clean_type(PaymentDetails::export_to_string()?));
    types.push(clean_type(RejectReason::export_to_string()?));

    // Feed types
    types.push(clean_type(MessageStatus::export_to_string()?));
    types.push(clean_type(FeedMessage::export_to_string()?));

    // Delivery types
    types.push(clean_type(WebhookPayload::export_to_string()?));
    types.push(clean_type(TelegramPayload::export_to_string()?));

    let output_dir = Path::new("../ui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Strips the ts-rs banner and sibling-file imports; every type lands in one file.
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let body = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n", body.trim())
}
