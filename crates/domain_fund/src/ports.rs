//! Fund Domain Ports
//!
//! This module defines the port interface for the fund record store, so the
//! service layer can run against PostgreSQL in production and an in-memory
//! store in tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_fund::ports::FundPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn FundPort> = Arc::new(PostgresFundAdapter::new(pool));
//! let funds = port.list_funds().await?;
//! ```

use async_trait::async_trait;

use core_kernel::{FundId, PortError, DomainPort, HealthCheckable};

use crate::fund::{Fund, FundDraft};

/// The record store port for funds
///
/// Implementations must enforce uniqueness of `tax_id` and report a
/// violation as `PortError::Conflict` with field `st_cnpj_fundo`.
#[async_trait]
pub trait FundPort: DomainPort + HealthCheckable {
    /// Lists every fund ordered by id
    async fn list_funds(&self) -> Result<Vec<Fund>, PortError>;

    /// Retrieves a fund by id, or `PortError::NotFound`
    async fn get_fund(&self, id: FundId) -> Result<Fund, PortError>;

    /// Finds the fund holding a tax id, if any
    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Fund>, PortError>;

    /// Inserts a new fund and returns it with its assigned id
    async fn insert_fund(&self, draft: &FundDraft) -> Result<Fund, PortError>;

    /// Replaces every writable field of an existing fund
    async fn update_fund(&self, id: FundId, draft: &FundDraft) -> Result<Fund, PortError>;

    /// Deletes a fund, or `PortError::NotFound`
    async fn delete_fund(&self, id: FundId) -> Result<(), PortError>;
}

/// Mock implementations for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    use crate::fund::fields;

    const MOCK_ADAPTER_ID: &str = "mock-fund-port";

    #[derive(Debug, Default)]
    struct MockState {
        funds: BTreeMap<FundId, Fund>,
        last_id: i64,
    }

    /// In-memory implementation of FundPort
    ///
    /// Assigns ids sequentially from 1 and enforces tax-id uniqueness the
    /// same way the database unique index does.
    #[derive(Debug, Clone, Default)]
    pub struct MockFundPort {
        state: Arc<RwLock<MockState>>,
        unavailable: Option<String>,
        stale_lookup: bool,
    }

    impl MockFundPort {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a store whose every operation fails with a connection error
        pub fn unavailable(message: impl Into<String>) -> Self {
            Self {
                unavailable: Some(message.into()),
                ..Self::default()
            }
        }

        /// Makes `find_by_tax_id` always report no holder
        ///
        /// Mimics a lookup that lost a race with a concurrent insert: the
        /// uniqueness rule is still enforced on write.
        pub fn with_stale_lookup(mut self) -> Self {
            self.stale_lookup = true;
            self
        }

        /// Pre-populates the store with drafts, in order
        pub async fn with_funds(drafts: Vec<FundDraft>) -> Self {
            let port = Self::new();
            {
                let mut state = port.state.write().await;
                for draft in drafts {
                    state.last_id += 1;
                    let id = FundId::new(state.last_id);
                    state.funds.insert(id, draft.into_fund(id));
                }
            }
            port
        }

        /// Returns the number of stored funds
        pub async fn len(&self) -> usize {
            self.state.read().await.funds.len()
        }

        /// Returns true if nothing is stored
        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }

        fn check_available(&self) -> Result<(), PortError> {
            match &self.unavailable {
                Some(message) => Err(PortError::unavailable(message.clone())),
                None => Ok(()),
            }
        }

        fn conflict(tax_id: &str) -> PortError {
            PortError::conflict(
                format!("duplicate key value violates unique constraint: st_cnpj_fundo={}", tax_id),
                fields::TAX_ID,
            )
        }
    }

    impl DomainPort for MockFundPort {}

    #[async_trait]
    impl HealthCheckable for MockFundPort {
        async fn health_check(&self) -> HealthCheckResult {
            match &self.unavailable {
                Some(message) => HealthCheckResult::unhealthy(MOCK_ADAPTER_ID, 0, message.clone()),
                None => HealthCheckResult::healthy(MOCK_ADAPTER_ID, 0),
            }
        }
    }

    #[async_trait]
    impl FundPort for MockFundPort {
        async fn list_funds(&self) -> Result<Vec<Fund>, PortError> {
            self.check_available()?;
            Ok(self.state.read().await.funds.values().cloned().collect())
        }

        async fn get_fund(&self, id: FundId) -> Result<Fund, PortError> {
            self.check_available()?;
            self.state
                .read()
                .await
                .funds
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Fund", id))
        }

        async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Fund>, PortError> {
            self.check_available()?;
            if self.stale_lookup {
                return Ok(None);
            }
            Ok(self
                .state
                .read()
                .await
                .funds
                .values()
                .find(|f| f.tax_id == tax_id)
                .cloned())
        }

        async fn insert_fund(&self, draft: &FundDraft) -> Result<Fund, PortError> {
            self.check_available()?;
            let mut state = self.state.write().await;
            if state.funds.values().any(|f| f.tax_id == draft.tax_id) {
                return Err(Self::conflict(&draft.tax_id));
            }

            state.last_id += 1;
            let id = FundId::new(state.last_id);
            let fund = draft.clone().into_fund(id);
            state.funds.insert(id, fund.clone());
            Ok(fund)
        }

        async fn update_fund(&self, id: FundId, draft: &FundDraft) -> Result<Fund, PortError> {
            self.check_available()?;
            let mut state = self.state.write().await;
            if !state.funds.contains_key(&id) {
                return Err(PortError::not_found("Fund", id));
            }
            if state.funds.values().any(|f| f.id != id && f.tax_id == draft.tax_id) {
                return Err(Self::conflict(&draft.tax_id));
            }

            let fund = draft.clone().into_fund(id);
            state.funds.insert(id, fund.clone());
            Ok(fund)
        }

        async fn delete_fund(&self, id: FundId) -> Result<(), PortError> {
            self.check_available()?;
            self.state
                .write()
                .await
                .funds
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Fund", id))
        }
    }
}
