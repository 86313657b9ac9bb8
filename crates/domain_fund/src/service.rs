//! Fund application service
//!
//! Runs each operation of the fund resource: validate the payload, enforce
//! tax-id uniqueness, then call the record store through `FundPort`.
//!
//! Uniqueness is checked before writing so the common case yields a field
//! error. Two concurrent writers can still both pass the check; the store's
//! unique constraint rejects the loser and that conflict is reported with the
//! same field error.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use core_kernel::{FundId, HealthCheckResult};

use crate::error::FundError;
use crate::fund::{Fund, FundDraft};
use crate::ports::FundPort;
use crate::validation::FundValidator;

/// Service exposing the fund CRUD operations
#[derive(Clone)]
pub struct FundService {
    port: Arc<dyn FundPort>,
    validator: FundValidator,
}

impl FundService {
    /// Creates a service over a record store
    ///
    /// # Arguments
    ///
    /// * `port` - The fund record store
    /// * `validator` - Payload validator (controls strict tax-id mode)
    pub fn new(port: Arc<dyn FundPort>, validator: FundValidator) -> Self {
        Self { port, validator }
    }

    /// Returns the validator in use
    pub fn validator(&self) -> &FundValidator {
        &self.validator
    }

    /// Checks the health of the underlying store
    pub async fn health_check(&self) -> HealthCheckResult {
        self.port.health_check().await
    }

    /// Lists all funds ordered by id
    pub async fn list(&self) -> Result<Vec<Fund>, FundError> {
        Ok(self.port.list_funds().await?)
    }

    /// Retrieves a fund
    ///
    /// # Errors
    ///
    /// `FundError::FundNotFound` if no fund has this id
    pub async fn retrieve(&self, id: FundId) -> Result<Fund, FundError> {
        self.port
            .get_fund(id)
            .await
            .map_err(|e| FundError::from_port(e, Some(id)))
    }

    /// Validates a payload and creates a fund from it
    ///
    /// # Errors
    ///
    /// `FundError::Validation` for a malformed payload or a taken tax id,
    /// `FundError::Store` for store failures
    pub async fn create(&self, payload: &Value) -> Result<Fund, FundError> {
        let draft = self.validator.validate_create(payload).map_err(FundError::Validation)?;
        self.ensure_tax_id_free(&draft, None).await?;

        let fund = self
            .port
            .insert_fund(&draft)
            .await
            .map_err(|e| FundError::from_port(e, None))?;

        info!(fund_id = %fund.id, tax_id = %fund.tax_id, "Fund created");
        Ok(fund)
    }

    /// Replaces every writable field of a fund
    ///
    /// The fund must exist before the payload is looked at.
    pub async fn replace(&self, id: FundId, payload: &Value) -> Result<Fund, FundError> {
        self.retrieve(id).await?;
        let draft = self.validator.validate_create(payload).map_err(FundError::Validation)?;
        self.write(id, draft).await
    }

    /// Applies the fields present in the payload to a fund
    pub async fn partial_update(&self, id: FundId, payload: &Value) -> Result<Fund, FundError> {
        let current = self.retrieve(id).await?;
        let patch = self.validator.validate_patch(payload).map_err(FundError::Validation)?;
        if patch.is_empty() {
            debug!(fund_id = %id, "Empty patch, returning current record");
            return Ok(current);
        }

        self.write(id, patch.apply_to(&current)).await
    }

    /// Deletes a fund
    pub async fn destroy(&self, id: FundId) -> Result<(), FundError> {
        self.port
            .delete_fund(id)
            .await
            .map_err(|e| FundError::from_port(e, Some(id)))?;

        info!(fund_id = %id, "Fund deleted");
        Ok(())
    }

    async fn write(&self, id: FundId, draft: FundDraft) -> Result<Fund, FundError> {
        self.ensure_tax_id_free(&draft, Some(id)).await?;

        let fund = self
            .port
            .update_fund(id, &draft)
            .await
            .map_err(|e| FundError::from_port(e, Some(id)))?;

        info!(fund_id = %fund.id, "Fund updated");
        Ok(fund)
    }

    /// Fails if another fund already holds the draft's tax id
    async fn ensure_tax_id_free(&self, draft: &FundDraft, owner: Option<FundId>) -> Result<(), FundError> {
        match self.port.find_by_tax_id(&draft.tax_id).await? {
            Some(existing) if Some(existing.id) != owner => {
                warn!(tax_id = %draft.tax_id, existing = %existing.id, "Tax id already registered");
                Err(FundError::tax_id_taken())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fund::fields;
    use crate::ports::mock::MockFundPort;
    use crate::validation::messages;
    use serde_json::json;

    fn service(port: MockFundPort) -> FundService {
        FundService::new(Arc::new(port), FundValidator::new())
    }

    fn payload(tax_id: &str) -> Value {
        json!({
            "st_cnpj_fundo": tax_id,
            "st_classe_fundo": "Multimercados",
            "st_estrategia_fundo": "LS/Arb",
        })
    }

    #[tokio::test]
    async fn test_create_then_retrieve() {
        let svc = service(MockFundPort::new());
        let created = svc.create(&payload("11.222.333/0001-81")).await.unwrap();
        let fetched = svc.retrieve(created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn test_duplicate_tax_id_is_validation_error() {
        let svc = service(MockFundPort::new());
        svc.create(&payload("X1")).await.unwrap();
        let err = svc.create(&payload("X1")).await.unwrap_err();
        match err {
            FundError::Validation(errors) => assert!(errors.contains(fields::TAX_ID)),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_conflict_is_reported_as_field_error() {
        let svc = service(MockFundPort::new().with_stale_lookup());
        svc.create(&payload("X1")).await.unwrap();
        let second = svc.create(&payload("X2")).await.unwrap();

        let on_create = svc.create(&payload("X1")).await.unwrap_err();
        let on_replace = svc.replace(second.id, &payload("X1")).await.unwrap_err();
        for err in [on_create, on_replace] {
            match err {
                FundError::Validation(errors) => {
                    let messages_for_tax_id = errors.get(fields::TAX_ID).unwrap();
                    assert_eq!(messages_for_tax_id.len(), 1);
                    assert_eq!(messages_for_tax_id[0], messages::TAX_ID_TAKEN);
                }
                other => panic!("Expected validation error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_replace_may_keep_own_tax_id() {
        let svc = service(MockFundPort::new());
        let fund = svc.create(&payload("X1")).await.unwrap();
        let mut body = payload("X1");
        body["st_estrategia_fundo"] = json!("Quant/Sist");
        let updated = svc.replace(fund.id, &body).await.unwrap();
        assert_eq!(updated.strategy, "Quant/Sist");
    }

    #[tokio::test]
    async fn test_patch_to_taken_tax_id_rejected() {
        let svc = service(MockFundPort::new());
        svc.create(&payload("X1")).await.unwrap();
        let second = svc.create(&payload("X2")).await.unwrap();
        let err = svc
            .partial_update(second.id, &json!({"st_cnpj_fundo": "X1"}))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_missing_fund_checked_before_payload() {
        let svc = service(MockFundPort::new());
        let err = svc.replace(FundId::new(9), &json!({})).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_missing_fund_checked_before_patch_payload() {
        let svc = service(MockFundPort::new());
        let err = svc
            .partial_update(FundId::new(9), &json!({"st_classe_fundo": 5, "relatorios": "x"}))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_empty_patch_returns_current_record() {
        let svc = service(MockFundPort::new());
        let fund = svc.create(&payload("X1")).await.unwrap();
        let unchanged = svc.partial_update(fund.id, &json!({})).await.unwrap();
        assert_eq!(unchanged, fund);
    }

    #[tokio::test]
    async fn test_destroy_then_retrieve() {
        let svc = service(MockFundPort::new());
        let fund = svc.create(&payload("X1")).await.unwrap();
        svc.destroy(fund.id).await.unwrap();
        assert!(svc.retrieve(fund.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_store_failure_is_store_error() {
        let svc = service(MockFundPort::unavailable("connection refused"));
        let err = svc.create(&payload("X1")).await.unwrap_err();
        assert!(matches!(err, FundError::Store(_)));
    }
}
