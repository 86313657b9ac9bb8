//! Core Kernel - Foundational types for the fund registry
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed identifiers
//! - Port infrastructure for the hexagonal (ports and adapters) layout
//! - Common error types

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::FundId;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::CoreError;
