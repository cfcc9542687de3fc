use std::{path::PathBuf, sync::Arc};

use clap::Args;
use tally::{
    entities::{Collection, EntityKind},
    fixtures::SampleData,
    mapping::into_storage,
};
use tally_app::{
    config::CacheConfig,
    database::{self, Db},
    stores::{JsonFileCache, LocalCache, PgRemoteStore, RemoteStore},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    #[command(flatten)]
    cache: CacheConfig,

    /// YAML fixture file; the bundled sample data is used when omitted
    #[arg(long)]
    file: Option<PathBuf>,

    /// `PostgreSQL` connection string; purchases are only seeded when set
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let data = match &args.file {
        Some(path) => SampleData::load(path),
        None => SampleData::bundled(),
    }
    .map_err(|error| format!("failed to load sample data: {error}"))?;

    let cache = JsonFileCache::new(args.cache.cache_dir);

    for kind in EntityKind::MIGRATION_ORDER {
        let records = data
            .bucket(kind)
            .map_err(|error| format!("failed to encode {kind}: {error}"))?;
        let count = records.len();

        cache
            .write_all(kind, records)
            .await
            .map_err(|error| format!("failed to write {}: {error}", kind.bucket()))?;

        println!("{}: {count}", kind.bucket());
    }

    let Some(database_url) = args.database_url else {
        println!("purchases: skipped (no database configured)");
        return Ok(());
    };

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let remote: Arc<dyn RemoteStore> = Arc::new(PgRemoteStore::new(Db::new(pool)));

    let purchases = data
        .purchases
        .into_iter()
        .map(into_storage)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| format!("failed to encode purchases: {error}"))?;

    let inserted = remote
        .insert_many(Collection::Purchases, purchases, Uuid::now_v7())
        .await
        .map_err(|error| format!("failed to insert purchases: {error}"))?;

    println!("purchases: {inserted}");

    Ok(())
}
