use std::path::PathBuf;

use clap::Args;
use tally::records::CustomerId;
use tally_app::domain::history::models::HistoryUpdate;

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct ReplaceArgs {
    #[command(flatten)]
    stores: StoreArgs,

    /// Customer whose history is replaced
    customer_id: String,

    /// JSON file with `appointments` and `purchaseItems` lists
    #[arg(long)]
    file: PathBuf,
}

pub(crate) async fn run(args: ReplaceArgs) -> Result<(), String> {
    if args.customer_id.trim().is_empty() {
        return Err("customer_id cannot be empty".to_string());
    }

    let json = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let update: HistoryUpdate = serde_json::from_str(&json)
        .map_err(|error| format!("failed to parse {}: {error}", args.file.display()))?;

    let context = args.stores.context().await?;

    let replaced = context
        .history
        .replace_history(&CustomerId::new(args.customer_id), update)
        .await
        .map_err(|error| format!("failed to replace history: {error}"))?;

    println!("appointments: {}", replaced.appointments);
    println!("purchases: {}", replaced.purchases);

    if replaced.dropped_items > 0 {
        println!("dropped incomplete purchase lines: {}", replaced.dropped_items);
    }

    Ok(())
}
