//! Local Cache Config

use std::path::PathBuf;

use clap::Args;

/// Local cache settings.
#[derive(Debug, Args)]
pub struct CacheConfig {
    /// Directory holding the local JSON buckets
    #[arg(long, env = "TALLY_CACHE_DIR", default_value = ".tally-cache")]
    pub cache_dir: PathBuf,
}
