//! Tally Domain Concerns

pub mod finance;
pub mod history;
pub mod ledger;
pub mod migration;
