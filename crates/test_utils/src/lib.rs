//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! fund registry test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built funds, tax ids and payloads
//! - `builders`: Builder for fund payloads and drafts
//! - `database`: PostgreSQL container management
//! - `assertions`: Assertion helpers for field errors and responses
//! - `generators`: Property-based and fake data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
