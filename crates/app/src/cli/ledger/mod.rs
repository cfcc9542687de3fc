use clap::{Args, Subcommand};

mod balances;

#[derive(Debug, Args)]
pub(crate) struct LedgerCommand {
    #[command(subcommand)]
    command: LedgerSubcommand,
}

#[derive(Debug, Subcommand)]
enum LedgerSubcommand {
    /// Show a customer's remaining voucher credits
    Balances(balances::BalancesArgs),
}

pub(crate) async fn run(command: LedgerCommand) -> Result<(), String> {
    match command.command {
        LedgerSubcommand::Balances(args) => balances::run(args).await,
    }
}
