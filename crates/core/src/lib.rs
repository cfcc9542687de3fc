//! Tally
//!
//! Customer credit ledger for a small service business: client and storage
//! record shapes, the field mapper between them, voucher balance derivation
//! and finance statistics.

pub mod entities;
pub mod finance;
pub mod fixtures;
pub mod ids;
pub mod ledger;
pub mod mapping;
pub mod records;
