//! Fund Registry Domain
//!
//! This crate holds everything about a fund record that does not depend on
//! HTTP or SQL: the record itself, how inbound payloads are validated and
//! normalized, and the port through which records are stored.
//!
//! # Key Concepts
//!
//! - **Fund**: a stored fund record keyed by a store-assigned integer id
//! - **FundDraft**: the full set of writable fields, already validated
//! - **FundPatch**: the subset of fields sent in a partial update
//! - **FundPort**: the record store interface (PostgreSQL or in-memory)
//! - **FundService**: validate, check tax-id uniqueness, persist
//!
//! # Examples
//!
//! ```rust
//! use domain_fund::{FundDraft, FundValidator};
//! use serde_json::json;
//!
//! let draft = FundValidator::new()
//!     .validate_create(&json!({
//!         "st_cnpj_fundo": "11.222.333/0001-81",
//!         "st_classe_fundo": "MM Int'l",
//!         "st_estrategia_fundo": "Asset Allocation - Int'l",
//!         "relatorios": ["MM Int"]
//!     }))
//!     .unwrap();
//!
//! assert_eq!(draft, FundDraft::new("11.222.333/0001-81", "MM Int'l", "Asset Allocation - Int'l")
//!     .with_reports(["MM Int"]));
//! ```

pub mod fund;
pub mod cnpj;
pub mod validation;
pub mod ports;
pub mod service;
pub mod error;

pub use fund::{fields, Fund, FundDraft, FundPatch};
pub use validation::{FieldErrors, FundValidator};
pub use ports::FundPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockFundPort;
pub use service::FundService;
pub use error::FundError;
