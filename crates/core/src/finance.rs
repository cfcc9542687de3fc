//! Finance statistics and record validation

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{Zoned, civil::Date};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::records::{FinanceKind, FinanceRecord};

/// Fields a finance record must carry.
const REQUIRED_FIELDS: [&str; 5] = ["id", "date", "type", "title", "amount"];

/// Income/expense totals over a set of finance records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceStats {
    /// Sum of income amounts.
    pub total_income: u64,

    /// Sum of expense amounts.
    pub total_expense: u64,

    /// Income minus expense.
    pub net_profit: i64,

    /// Number of records considered.
    pub total_records: usize,

    /// Number of income records.
    pub income_count: usize,

    /// Number of expense records.
    pub expense_count: usize,
}

/// Compute totals over the records.
pub fn finance_stats<'a>(records: impl IntoIterator<Item = &'a FinanceRecord>) -> FinanceStats {
    let mut stats = FinanceStats::default();

    for record in records {
        stats.total_records += 1;

        match record.kind {
            FinanceKind::Income => {
                stats.income_count += 1;
                stats.total_income = stats.total_income.saturating_add(record.amount);
            }
            FinanceKind::Expense => {
                stats.expense_count += 1;
                stats.total_expense = stats.total_expense.saturating_add(record.amount);
            }
        }
    }

    stats.net_profit = signed(stats.total_income).saturating_sub(signed(stats.total_expense));

    stats
}

/// Compute totals over the records dated within the month.
pub fn monthly_stats(records: &[FinanceRecord], month: YearMonth) -> FinanceStats {
    finance_stats(records.iter().filter(|record| month.contains(&record.date)))
}

/// Compute totals over the records dated within the current month.
pub fn current_month_stats(records: &[FinanceRecord]) -> FinanceStats {
    monthly_stats(records, YearMonth::current())
}

/// The `limit` most recent records, newest first.
pub fn recent_records(records: &[FinanceRecord], limit: usize) -> Vec<FinanceRecord> {
    let mut sorted = records.to_vec();

    // ISO dates order lexically.
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);

    sorted
}

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i16,
    month: i8,
}

impl YearMonth {
    /// The month containing the date.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in the system time zone.
    pub fn current() -> Self {
        Self::of(Zoned::now().date())
    }

    /// Whether a `YYYY-MM-DD` date string falls within this month.
    pub fn contains(self, date: &str) -> bool {
        date.starts_with(&self.to_string())
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Invalid `YYYY-MM` month string
#[derive(Debug, Error)]
#[error("invalid month '{0}', expected YYYY-MM")]
pub struct InvalidMonth(String);

impl FromStr for YearMonth {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 7 {
            return Err(InvalidMonth(s.to_string()));
        }

        parse_iso_date(&format!("{s}-01"))
            .map(Self::of)
            .ok_or_else(|| InvalidMonth(s.to_string()))
    }
}

/// Finance record validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinanceRecordError {
    /// The record is not a JSON object.
    #[error("finance record is not an object")]
    NotAnObject,

    /// A required field is absent or empty.
    #[error("finance record is missing '{0}'")]
    MissingField(&'static str),

    /// The date is not `YYYY-MM-DD`.
    #[error("invalid finance date '{0}'")]
    InvalidDate(String),

    /// The type is neither `income` nor `expense`.
    #[error("invalid finance type '{0}'")]
    InvalidKind(String),

    /// The amount is not a non-negative whole number.
    #[error("invalid finance amount '{0}'")]
    InvalidAmount(String),
}

/// Check a raw finance record and decode it.
///
/// # Errors
///
/// Returns the first problem found with the record.
pub fn validate_finance_record(value: &Value) -> Result<FinanceRecord, FinanceRecordError> {
    let object = value.as_object().ok_or(FinanceRecordError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        let present = match object.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        };

        if !present {
            return Err(FinanceRecordError::MissingField(field));
        }
    }

    let text = |field: &'static str| {
        object
            .get(field)
            .and_then(Value::as_str)
            .ok_or(FinanceRecordError::MissingField(field))
    };

    let id = text("id")?;
    let title = text("title")?;

    let date = text("date")?;
    if parse_iso_date(date).is_none() {
        return Err(FinanceRecordError::InvalidDate(date.to_string()));
    }

    let kind = match text("type")? {
        "income" => FinanceKind::Income,
        "expense" => FinanceKind::Expense,
        other => return Err(FinanceRecordError::InvalidKind(other.to_string())),
    };

    let raw_amount = object.get("amount").unwrap_or(&Value::Null);
    let amount = raw_amount
        .as_u64()
        .ok_or_else(|| FinanceRecordError::InvalidAmount(raw_amount.to_string()))?;

    let memo = object
        .get("memo")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(FinanceRecord {
        id: id.into(),
        date: date.to_string(),
        kind,
        title: title.to_string(),
        amount,
        memo: memo.to_string(),
    })
}

/// Outcome of loading a set of raw finance records.
#[derive(Debug, Default)]
pub struct FinanceLoad {
    /// Records that passed validation, in input order.
    pub records: Vec<FinanceRecord>,

    /// Input position and reason of every rejected record.
    pub rejected: Vec<(usize, FinanceRecordError)>,
}

/// Validate every raw record, keeping the good ones.
pub fn load_valid_records(values: &[Value]) -> FinanceLoad {
    let mut load = FinanceLoad::default();

    for (index, value) in values.iter().enumerate() {
        match validate_finance_record(value) {
            Ok(record) => load.records.push(record),
            Err(error) => load.rejected.push((index, error)),
        }
    }

    load
}

/// A won amount as money.
pub fn won(amount: i64) -> Money<'static, Currency> {
    Money::from_minor(amount, iso::KRW)
}

/// Format a won amount with thousands separators and no currency symbol.
pub fn format_amount(amount: i64) -> String {
    format!("{}", won(amount))
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '-'))
        .collect()
}

/// Parse an amount typed with optional thousands separators.
///
/// Anything that is not a whole non-negative number parses as 0.
pub fn parse_amount(input: &str) -> u64 {
    input.replace(',', "").trim().parse().unwrap_or_default()
}

fn parse_iso_date(s: &str) -> Option<Date> {
    let bytes = s.as_bytes();

    let shaped = bytes.len() == 10
        && bytes.get(4) == Some(&b'-')
        && bytes.get(7) == Some(&b'-')
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !shaped {
        return None;
    }

    s.parse().ok()
}

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}
