use tally::entities::EntityKind;
use tally_app::domain::migration::MigrationAdvice;

use crate::cli::{StoreArgs, table};

pub(crate) async fn run(args: StoreArgs) -> Result<(), String> {
    let context = args.context().await?;

    let status = context
        .migration
        .status()
        .await
        .map_err(|error| format!("failed to check migration status: {error}"))?;

    let rows = EntityKind::MIGRATION_ORDER.into_iter().map(|kind| {
        [
            kind.to_string(),
            status.local_counts.get(kind).to_string(),
            status.remote_counts.get(kind).to_string(),
        ]
    });

    println!("{}", table::render(["Entity", "Local", "Remote"], rows, 1..3));

    let advice = match status.advice() {
        MigrationAdvice::Migrate => "local data has not been migrated; run `tally migrate run`",
        MigrationAdvice::ClearLocal => {
            "local and remote data both exist; verify the remote copy, then run `tally migrate clear`"
        }
        MigrationAdvice::Complete => "migration is complete",
        MigrationAdvice::Empty => "no data found locally or remotely",
    };

    println!("{advice}");

    Ok(())
}
