//! PostgreSQL Fund Adapter
//!
//! The internal (database) adapter for the fund domain, implementing the
//! `FundPort` trait using PostgreSQL via the `FundRepository`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresFundAdapter;
//! use domain_fund::FundPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn FundPort> = Arc::new(PostgresFundAdapter::new(pool));
//! let funds = port.list_funds().await?;
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    DomainPort, FundId, HealthCheckResult, HealthCheckable, PortError,
};
use domain_fund::{fields, Fund, FundDraft, FundPort};

use crate::error::DatabaseError;
use crate::repositories::fund::{FundRepository, FundRow, NewFund};

const ADAPTER_ID: &str = "postgres-fund-adapter";

/// PostgreSQL-backed implementation of the FundPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict` on `st_cnpj_fundo`
/// - Connection and pool errors -> `PortError::Unavailable`
/// - Other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresFundAdapter {
    repository: FundRepository,
    pool: PgPool,
}

impl PostgresFundAdapter {
    /// Creates a new PostgreSQL fund adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FundRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &FundRepository {
        &self.repository
    }
}

impl DomainPort for PostgresFundAdapter {}

#[async_trait]
impl HealthCheckable for PostgresFundAdapter {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(_) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(ADAPTER_ID, latency_ms, format!("Database error: {}", e)),
        }
    }
}

#[async_trait]
impl FundPort for PostgresFundAdapter {
    #[instrument(skip(self))]
    async fn list_funds(&self) -> Result<Vec<Fund>, PortError> {
        let rows = self.repository.list().await.map_err(db_to_port_error)?;
        debug!(count = rows.len(), "Listed funds");
        Ok(rows.into_iter().map(row_to_fund).collect())
    }

    #[instrument(skip(self), fields(fund_id = %id))]
    async fn get_fund(&self, id: FundId) -> Result<Fund, PortError> {
        self.repository
            .get_by_id(id.value())
            .await
            .map(row_to_fund)
            .map_err(|e| fund_error(e, id))
    }

    #[instrument(skip(self))]
    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Fund>, PortError> {
        self.repository
            .find_by_tax_id(tax_id)
            .await
            .map(|row| row.map(row_to_fund))
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self, draft), fields(tax_id = %draft.tax_id))]
    async fn insert_fund(&self, draft: &FundDraft) -> Result<Fund, PortError> {
        let row = self
            .repository
            .insert(&new_fund(draft))
            .await
            .map_err(db_to_port_error)?;
        debug!(fund_id = row.id, "Inserted fund");
        Ok(row_to_fund(row))
    }

    #[instrument(skip(self, draft), fields(fund_id = %id))]
    async fn update_fund(&self, id: FundId, draft: &FundDraft) -> Result<Fund, PortError> {
        self.repository
            .update(id.value(), &new_fund(draft))
            .await
            .map(row_to_fund)
            .map_err(|e| fund_error(e, id))
    }

    #[instrument(skip(self), fields(fund_id = %id))]
    async fn delete_fund(&self, id: FundId) -> Result<(), PortError> {
        self.repository
            .delete(id.value())
            .await
            .map_err(|e| fund_error(e, id))
    }
}

fn new_fund(draft: &FundDraft) -> NewFund<'_> {
    NewFund {
        st_cnpj_fundo: &draft.tax_id,
        st_classe_fundo: &draft.fund_class,
        st_estrategia_fundo: &draft.strategy,
        st_obs_fundo: draft.notes.as_deref(),
        relatorios: &draft.reports,
        cod_quantum_fundomaster: draft.master_fund_code.as_deref(),
        st_cnpj_fundomaster: draft.master_fund_tax_id.as_deref(),
    }
}

fn row_to_fund(row: FundRow) -> Fund {
    Fund {
        id: FundId::new(row.id),
        tax_id: row.st_cnpj_fundo,
        fund_class: row.st_classe_fundo,
        strategy: row.st_estrategia_fundo,
        notes: row.st_obs_fundo,
        reports: row.relatorios.0,
        master_fund_code: row.cod_quantum_fundomaster,
        master_fund_tax_id: row.st_cnpj_fundomaster,
    }
}

/// Converts a DatabaseError raised while working on a known fund
fn fund_error(e: DatabaseError, id: FundId) -> PortError {
    if e.is_not_found() {
        PortError::not_found("Fund", id)
    } else {
        db_to_port_error(e)
    }
}

/// Converts a DatabaseError to a PortError
fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::NotFound(msg) => PortError::not_found("Fund", msg),
        DatabaseError::DuplicateEntry { message, .. } => PortError::conflict(message, fields::TAX_ID),
        DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted => {
            PortError::unavailable(e.to_string()).with_source(e)
        }
        other => PortError::internal(other.to_string()).with_source(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sqlx::types::Json;

    fn row() -> FundRow {
        FundRow {
            id: 5,
            st_cnpj_fundo: "11.222.333/0001-81".to_string(),
            st_classe_fundo: "Multimercados".to_string(),
            st_estrategia_fundo: "LS/Arb".to_string(),
            st_obs_fundo: None,
            relatorios: Json(vec!["MM Int".to_string()]),
            cod_quantum_fundomaster: Some("Q1".to_string()),
            st_cnpj_fundomaster: None,
        }
    }

    #[test]
    fn test_row_to_fund() {
        let fund = row_to_fund(row());
        assert_eq!(fund.id, FundId::new(5));
        assert_eq!(fund.reports, vec!["MM Int".to_string()]);
        assert_eq!(fund.master_fund_code.as_deref(), Some("Q1"));
    }

    #[test]
    fn test_new_fund_borrows_draft() {
        let draft = row_to_fund(row()).to_draft();
        let values = new_fund(&draft);
        assert_eq!(values.st_cnpj_fundo, "11.222.333/0001-81");
        assert_eq!(values.relatorios.len(), 1);
        assert_eq!(values.st_obs_fundo, None);
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err = db_to_port_error(DatabaseError::DuplicateEntry {
            message: "duplicate key".to_string(),
            constraint: None,
        });
        assert!(err.is_conflict());
    }

    #[test]
    fn test_pool_exhaustion_is_unavailable() {
        assert!(db_to_port_error(DatabaseError::PoolExhausted).is_unavailable());
    }

    #[test]
    fn test_not_found_names_the_fund() {
        let err = fund_error(DatabaseError::not_found("fundos", 3), FundId::new(3));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Fund 3 not found");
    }

    proptest! {
        #[test]
        fn row_mapping_keeps_reports_in_order(reports in proptest::collection::vec(".{0,30}", 0..8)) {
            let mut source = row();
            source.relatorios = Json(reports.clone());
            let fund = row_to_fund(source);
            prop_assert_eq!(&fund.reports, &reports);
            let draft = fund.to_draft();
            prop_assert_eq!(new_fund(&draft).relatorios, reports.as_slice());
        }
    }
}
