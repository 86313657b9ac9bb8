//! Domain Adapters
//!
//! Adapter implementations for domain ports, connecting domain interfaces to
//! the PostgreSQL repositories.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresFundAdapter;
//! use domain_fund::FundPort;
//!
//! let adapter = PostgresFundAdapter::new(pool);
//! let fund = adapter.get_fund(fund_id).await?;
//! ```

pub mod fund;

pub use fund::PostgresFundAdapter;
