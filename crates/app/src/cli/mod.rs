use clap::{Args, Parser, Subcommand};
use tally_app::{
    config::{CacheConfig, DatabaseConfig, LoggingConfig},
    context::AppContext,
    observability,
};

mod db;
mod finance;
mod history;
mod ledger;
mod migrate;
mod seed;
mod table;

#[derive(Debug, Parser)]
#[command(name = "tally", about = "Tally CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Migrate(migrate::MigrateCommand),
    Ledger(ledger::LedgerCommand),
    Finance(finance::FinanceCommand),
    History(history::HistoryCommand),
    Seed(seed::SeedArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Migrate(command) => migrate::run(command).await,
            Commands::Ledger(command) => ledger::run(command).await,
            Commands::Finance(command) => finance::run(command).await,
            Commands::History(command) => history::run(command).await,
            Commands::Seed(args) => seed::run(args).await,
        }
    }
}

/// Remote store and local cache settings shared by data commands.
#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    cache: CacheConfig,
}

impl StoreArgs {
    pub(crate) async fn context(&self) -> Result<AppContext, String> {
        AppContext::from_config(&self.database.database_url, &self.cache.cache_dir)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
