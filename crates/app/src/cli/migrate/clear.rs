use clap::Args;
use tally_app::{
    config::CacheConfig,
    stores::{JsonFileCache, LocalCache},
};

use super::{Entity, selected_kinds};

#[derive(Debug, Args)]
pub(crate) struct ClearArgs {
    #[command(flatten)]
    cache: CacheConfig,

    /// Only clear these entity kinds
    #[arg(long = "entity", value_enum)]
    entities: Vec<Entity>,
}

pub(crate) async fn run(args: ClearArgs) -> Result<(), String> {
    let cache = JsonFileCache::new(args.cache.cache_dir);

    for kind in selected_kinds(&args.entities) {
        cache
            .clear(kind)
            .await
            .map_err(|error| format!("failed to clear {kind}: {error}"))?;

        println!("cleared {}", kind.bucket());
    }

    Ok(())
}
