use clap::{Args, Subcommand};

mod replace;

#[derive(Debug, Args)]
pub(crate) struct HistoryCommand {
    #[command(subcommand)]
    command: HistorySubcommand,
}

#[derive(Debug, Subcommand)]
enum HistorySubcommand {
    /// Replace a customer's appointments and purchases from a JSON file
    Replace(replace::ReplaceArgs),
}

pub(crate) async fn run(command: HistoryCommand) -> Result<(), String> {
    match command.command {
        HistorySubcommand::Replace(args) => replace::run(args).await,
    }
}
