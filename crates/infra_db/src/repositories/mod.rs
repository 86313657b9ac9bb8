//! Repository implementations
//!
//! Repositories own the SQL for each table and map between database rows and
//! plain row structs. They know nothing about domain validation; adapters
//! translate rows into domain records.

pub mod fund;

pub use fund::{FundRepository, FundRow, NewFund};
