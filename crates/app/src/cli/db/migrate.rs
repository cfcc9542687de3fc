use clap::Args;
use tally_app::{config::DatabaseConfig, database};

#[derive(Debug, Args)]
pub(crate) struct MigrateSchemaArgs {
    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(args: MigrateSchemaArgs) -> Result<(), String> {
    let pool = database::connect(&args.database.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply schema migrations: {error}"))?;

    println!("remote collections are up to date");

    Ok(())
}
