use clap::Args;
use tally_app::domain::migration::{DuplicatePolicy, JobOutcome};

use super::{Entity, selected_kinds};
use crate::cli::{StoreArgs, table};

#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    #[command(flatten)]
    stores: StoreArgs,

    /// Only migrate these entity kinds
    #[arg(long = "entity", value_enum)]
    entities: Vec<Entity>,

    /// Insert every local record, even when its id already exists remotely
    #[arg(long)]
    allow_duplicates: bool,

    /// Clear the migrated local buckets when every job succeeds
    #[arg(long)]
    clear_local: bool,
}

pub(crate) async fn run(args: RunArgs) -> Result<(), String> {
    let context = args.stores.context().await?;

    let policy = if args.allow_duplicates {
        DuplicatePolicy::Insert
    } else {
        DuplicatePolicy::SkipExisting
    };

    let kinds = selected_kinds(&args.entities);
    let report = context.migration.migrate_selected(&kinds, policy).await;

    let rows = report.iter().filter_map(|(kind, result)| match result {
        Ok(JobOutcome::NotSelected) => None,
        Ok(JobOutcome::NoOp) => Some([
            kind.to_string(),
            "no-op".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            String::new(),
        ]),
        Ok(JobOutcome::Migrated(summary)) => Some([
            kind.to_string(),
            "ok".to_string(),
            summary.inserted.to_string(),
            summary.skipped.to_string(),
            summary.rejected.to_string(),
            String::new(),
        ]),
        Err(error) => Some([
            kind.to_string(),
            "failed".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            error.to_string(),
        ]),
    });

    println!("batch: {}", report.batch);
    println!(
        "{}",
        table::render(
            ["Entity", "Result", "Inserted", "Skipped", "Rejected", "Error"],
            rows,
            2..5,
        )
    );

    let failures = report.iter().filter(|(_, result)| result.is_err()).count();

    if failures > 0 {
        return Err(format!("migration finished with {failures} failed job(s)"));
    }

    if args.clear_local {
        context
            .migration
            .clear_local(&kinds)
            .await
            .map_err(|error| format!("failed to clear local data: {error}"))?;

        let cleared: Vec<&str> = kinds.iter().map(|kind| kind.bucket()).collect();

        println!("cleared local buckets: {}", cleared.join(", "));
    }

    Ok(())
}
