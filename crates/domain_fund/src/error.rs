//! Fund domain errors

use thiserror::Error;

use core_kernel::{FundId, PortError};

use crate::fund::fields;
use crate::validation::{messages, FieldErrors};

/// Errors that can occur in the fund domain
#[derive(Debug, Error)]
pub enum FundError {
    /// The payload failed validation; carries every offending field
    #[error("Invalid fund data: {0}")]
    Validation(FieldErrors),

    /// No fund exists with the given id
    #[error("Fund not found: {0}")]
    FundNotFound(FundId),

    /// The record store failed
    #[error("Fund store error: {0}")]
    Store(#[from] PortError),
}

impl FundError {
    /// Creates the uniqueness error reported for a taken tax id
    pub fn tax_id_taken() -> Self {
        FundError::Validation(FieldErrors::single(fields::TAX_ID, messages::TAX_ID_TAKEN))
    }

    /// Returns true if this error is caused by the request payload
    pub fn is_validation(&self) -> bool {
        matches!(self, FundError::Validation(_))
    }

    /// Returns true if the fund does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, FundError::FundNotFound(_))
    }

    /// Translates a store error raised while working on `id`
    ///
    /// Not-found and uniqueness conflicts become domain errors; everything
    /// else stays a store error.
    pub(crate) fn from_port(error: PortError, id: Option<FundId>) -> Self {
        match (error, id) {
            (PortError::NotFound { .. }, Some(id)) => FundError::FundNotFound(id),
            (PortError::Conflict { .. }, _) => FundError::tax_id_taken(),
            (error, _) => FundError::Store(error),
        }
    }
}
