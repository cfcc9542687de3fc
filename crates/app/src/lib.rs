//! Tally application: stores, services and wiring shared by the CLI.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod observability;
pub mod stores;

#[cfg(test)]
mod test;
