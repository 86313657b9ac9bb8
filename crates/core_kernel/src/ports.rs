//! Ports and Adapters Infrastructure
//!
//! Shared vocabulary between a domain port (a trait defined next to the
//! domain) and the adapters that implement it. The domain only ever sees
//! `PortError`; adapters translate their native errors into it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a port
#[derive(Debug, Error)]
pub enum PortError {
    /// No record with this id
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness rule rejected the write
    #[error("Conflict on {field}: {message}")]
    Conflict { message: String, field: String },

    /// The backing store could not be reached
    #[error("Store unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<Source>,
    },

    /// The store failed in an unexpected way
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Source>,
    },
}

impl PortError {
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
            field: field.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        PortError::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause to an `Unavailable` or `Internal` error
    pub fn with_source(self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        match self {
            PortError::Unavailable { message, .. } => PortError::Unavailable {
                message,
                source: Some(Box::new(cause)),
            },
            PortError::Internal { message, .. } => PortError::Internal {
                message,
                source: Some(Box::new(cause)),
            },
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }

    /// True when the store could not be reached; a retry may succeed
    pub fn is_unavailable(&self) -> bool {
        matches!(self, PortError::Unavailable { .. })
    }
}

/// Marker for port traits: shareable behind `Arc<dyn ...>` across tasks
pub trait DomainPort: Send + Sync + 'static {}

/// Health of an adapter's backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Outcome of probing an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    pub fn healthy(adapter_id: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: Utc::now(),
        }
    }

    pub fn unhealthy(
        adapter_id: impl Into<String>,
        latency_ms: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(message.into()),
            checked_at: Utc::now(),
        }
    }

    /// Returns true when the adapter can serve requests
    pub fn is_operational(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Adapters that can check their backing store
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = PortError::not_found("Fund", 123);
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Fund 123 not found");
    }

    #[test]
    fn test_conflict_carries_field() {
        match PortError::conflict("duplicate key", "st_cnpj_fundo") {
            PortError::Conflict { field, .. } => assert_eq!(field, "st_cnpj_fundo"),
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_with_source_keeps_message() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = PortError::unavailable("pool closed").with_source(io);
        assert!(error.is_unavailable());
        assert!(std::error::Error::source(&error).is_some());
        assert_eq!(error.to_string(), "Store unavailable: pool closed");
    }

    #[test]
    fn test_health_constructors() {
        assert!(HealthCheckResult::healthy("pg", 2).is_operational());

        let down = HealthCheckResult::unhealthy("pg", 30, "timeout");
        assert!(!down.is_operational());
        assert_eq!(down.message.as_deref(), Some("timeout"));
    }
}
