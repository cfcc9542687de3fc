use clap::{Args, Subcommand};

mod stats;

#[derive(Debug, Args)]
pub(crate) struct FinanceCommand {
    #[command(subcommand)]
    command: FinanceSubcommand,
}

#[derive(Debug, Subcommand)]
enum FinanceSubcommand {
    /// Summarise income and expenses
    Stats(stats::StatsArgs),
}

pub(crate) async fn run(command: FinanceCommand) -> Result<(), String> {
    match command.command {
        FinanceSubcommand::Stats(args) => stats::run(args).await,
    }
}
