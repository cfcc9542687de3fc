//! Finance service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use tally::{
    entities::Collection,
    finance::{
        FinanceStats, YearMonth, finance_stats, load_valid_records, monthly_stats, recent_records,
    },
    records::FinanceRecord,
};
use tracing::warn;

use crate::{domain::finance::errors::FinanceServiceError, stores::RemoteStore};

/// Number of records listed as recent activity.
pub const RECENT_LIMIT: usize = 5;

/// Finance figures over the stored records.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceReport {
    /// Month the statistics are restricted to, if any.
    pub month: Option<YearMonth>,

    pub stats: FinanceStats,

    /// Most recent records, newest first.
    pub recent: Vec<FinanceRecord>,

    /// Stored records that failed validation.
    pub rejected: usize,
}

#[derive(Clone)]
pub struct RemoteFinanceService {
    remote: Arc<dyn RemoteStore>,
}

impl RemoteFinanceService {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self { remote }
    }
}

#[async_trait]
impl FinanceService for RemoteFinanceService {
    async fn report(&self, month: Option<YearMonth>) -> Result<FinanceReport, FinanceServiceError> {
        // Finance fields are named the same in both shapes, so stored rows
        // are validated as they are.
        let values: Vec<Value> = self
            .remote
            .select_all(Collection::Finance)
            .await?
            .into_iter()
            .map(Value::Object)
            .collect();

        let load = load_valid_records(&values);

        for (index, error) in &load.rejected {
            warn!(index, %error, "skipping invalid finance record");
        }

        let stats = match month {
            Some(month) => monthly_stats(&load.records, month),
            None => finance_stats(&load.records),
        };

        Ok(FinanceReport {
            month,
            stats,
            recent: recent_records(&load.records, RECENT_LIMIT),
            rejected: load.rejected.len(),
        })
    }
}

#[automock]
#[async_trait]
pub trait FinanceService: Send + Sync {
    /// Statistics over every stored record, or over one month.
    async fn report(&self, month: Option<YearMonth>) -> Result<FinanceReport, FinanceServiceError>;
}
