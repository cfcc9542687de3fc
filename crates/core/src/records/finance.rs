//! Finance Records

use serde::{Deserialize, Serialize};

use crate::{ids::TypedId, records::null_as_default};

/// Finance Record Id
pub type FinanceRecordId = TypedId<FinanceRecord>;

/// Direction of a finance record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinanceKind {
    /// Money received.
    #[default]
    Income,

    /// Money spent.
    Expense,
}

/// Finance Record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinanceRecord {
    /// Record identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: FinanceRecordId,

    /// Booking date (`YYYY-MM-DD`).
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,

    /// Income or expense.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: FinanceKind,

    /// Short description.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,

    /// Amount in won.
    #[serde(deserialize_with = "null_as_default")]
    pub amount: u64,

    /// Free-text memo.
    #[serde(deserialize_with = "null_as_default")]
    pub memo: String,
}
