//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL infrastructure for the fund registry
//! using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `FundRepository` owns the SQL
//! and row types, and `PostgresFundAdapter` implements the domain's
//! `FundPort` on top of it, translating rows into domain records and
//! database errors into port errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, run_migrations, PostgresFundAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/fundos")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresFundAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod migrations;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use migrations::run_migrations;
pub use repositories::FundRepository;
pub use adapters::PostgresFundAdapter;
