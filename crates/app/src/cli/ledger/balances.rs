use clap::Args;
use tally::{ledger::ConsumptionPolicy, records::CustomerId};

use crate::cli::{StoreArgs, table};

#[derive(Debug, Args)]
pub(crate) struct BalancesArgs {
    #[command(flatten)]
    stores: StoreArgs,

    /// Customer whose balances should be shown
    customer_id: String,

    /// Do not count cancelled or no-show appointments as consumption
    #[arg(long)]
    exclude_cancelled: bool,

    /// Print balances as JSON
    #[arg(long)]
    json: bool,
}

pub(crate) async fn run(args: BalancesArgs) -> Result<(), String> {
    if args.customer_id.trim().is_empty() {
        return Err("customer_id cannot be empty".to_string());
    }

    let context = args.stores.context().await?;

    let policy = if args.exclude_cancelled {
        ConsumptionPolicy::ExcludeCancelled
    } else {
        ConsumptionPolicy::EveryAppointment
    };

    let customer = CustomerId::new(args.customer_id);

    let balances = context
        .ledger
        .voucher_balances(&customer, policy)
        .await
        .map_err(|error| format!("failed to compute balances: {error}"))?;

    if args.json {
        let json = serde_json::to_string_pretty(&balances)
            .map_err(|error| format!("failed to encode balances: {error}"))?;

        println!("{json}");

        return Ok(());
    }

    if balances.is_empty() {
        println!("no remaining credits for customer {customer}");
        return Ok(());
    }

    let rows = balances.iter().map(|balance| {
        [
            balance.product_name.clone(),
            balance.unit_credits.to_string(),
            balance.total_purchased_units.to_string(),
            balance.total_credits_purchased.to_string(),
            balance.total_credits_consumed.to_string(),
            balance.remaining_credits.to_string(),
        ]
    });

    println!(
        "{}",
        table::render(
            ["Product", "Credits/Unit", "Units", "Purchased", "Consumed", "Remaining"],
            rows,
            1..6,
        )
    );

    Ok(())
}
