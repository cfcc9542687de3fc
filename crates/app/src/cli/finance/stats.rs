use clap::Args;
use tally::{
    finance::{YearMonth, format_amount},
    records::FinanceKind,
};

use crate::cli::{StoreArgs, table};

#[derive(Debug, Args)]
pub(crate) struct StatsArgs {
    #[command(flatten)]
    stores: StoreArgs,

    /// Month to summarise (YYYY-MM); defaults to the current month
    #[arg(long, conflicts_with = "all")]
    month: Option<YearMonth>,

    /// Summarise every record instead of a single month
    #[arg(long)]
    all: bool,
}

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

pub(crate) async fn run(args: StatsArgs) -> Result<(), String> {
    let context = args.stores.context().await?;

    let month = if args.all {
        None
    } else {
        Some(args.month.unwrap_or_else(YearMonth::current))
    };

    let report = context
        .finance
        .report(month)
        .await
        .map_err(|error| format!("failed to build finance report: {error}"))?;

    match report.month {
        Some(month) => println!("period: {month}"),
        None => println!("period: all records"),
    }

    let stats = report.stats;

    println!(
        "{}",
        table::render(
            ["", "Records", "Amount"],
            [
                [
                    "Income".to_string(),
                    stats.income_count.to_string(),
                    format_amount(signed(stats.total_income)),
                ],
                [
                    "Expense".to_string(),
                    stats.expense_count.to_string(),
                    format_amount(signed(stats.total_expense)),
                ],
                [
                    "Net".to_string(),
                    stats.total_records.to_string(),
                    format_amount(stats.net_profit),
                ],
            ],
            1..3,
        )
    );

    if !report.recent.is_empty() {
        let rows = report.recent.iter().map(|record| {
            let amount = match record.kind {
                FinanceKind::Income => signed(record.amount),
                FinanceKind::Expense => -signed(record.amount),
            };

            [record.date.clone(), record.title.clone(), format_amount(amount)]
        });

        println!("recent records");
        println!("{}", table::render(["Date", "Title", "Amount"], rows, 2..3));
    }

    if report.rejected > 0 {
        println!("skipped {} invalid record(s)", report.rejected);
    }

    Ok(())
}
