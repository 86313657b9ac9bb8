//! Fund definition
//!
//! This module defines the stored `Fund` record together with the two inbound
//! shapes that produce or change it: `FundDraft` (a complete, validated set of
//! writable fields) and `FundPatch` (a subset of writable fields).

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use core_kernel::FundId;

/// Wire names of the fund fields
///
/// Validation errors are keyed by these names, so they double as the JSON
/// property names of the transfer representation.
pub mod fields {
    pub const ID: &str = "id";
    pub const TAX_ID: &str = "st_cnpj_fundo";
    pub const FUND_CLASS: &str = "st_classe_fundo";
    pub const STRATEGY: &str = "st_estrategia_fundo";
    pub const NOTES: &str = "st_obs_fundo";
    pub const REPORTS: &str = "relatorios";
    pub const MASTER_FUND_CODE: &str = "cod_quantum_fundomaster";
    pub const MASTER_FUND_TAX_ID: &str = "st_cnpj_fundomaster";
}

/// Maximum length of `st_cnpj_fundo`
pub const TAX_ID_MAX_LEN: u64 = 20;
/// Maximum length of `st_classe_fundo`
pub const FUND_CLASS_MAX_LEN: u64 = 100;
/// Maximum length of `cod_quantum_fundomaster`
pub const MASTER_FUND_CODE_MAX_LEN: u64 = 50;
/// Maximum length of `st_cnpj_fundomaster`
pub const MASTER_FUND_TAX_ID_MAX_LEN: u64 = 20;

/// A stored investment fund record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fund {
    /// Store-assigned identifier
    pub id: FundId,
    /// Fund tax registration (CNPJ), unique across all funds
    pub tax_id: String,
    /// Fund class (e.g. the ANBIMA classification)
    pub fund_class: String,
    /// Investment strategy description
    pub strategy: String,
    /// Free-form notes
    pub notes: Option<String>,
    /// Names of the reports the fund appears in; never null
    pub reports: Vec<String>,
    /// Master fund code in the portfolio system
    pub master_fund_code: Option<String>,
    /// Master fund tax registration (CNPJ)
    pub master_fund_tax_id: Option<String>,
}

impl Fund {
    /// Returns the writable fields of this record as a draft
    pub fn to_draft(&self) -> FundDraft {
        FundDraft {
            tax_id: self.tax_id.clone(),
            fund_class: self.fund_class.clone(),
            strategy: self.strategy.clone(),
            notes: self.notes.clone(),
            reports: self.reports.clone(),
            master_fund_code: self.master_fund_code.clone(),
            master_fund_tax_id: self.master_fund_tax_id.clone(),
        }
    }
}

impl fmt::Display for Fund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fundo {}", self.tax_id)
    }
}

/// The complete set of writable fund fields
///
/// Produced by the validator for create and full-update requests, and by
/// applying a `FundPatch` to an existing record. Length limits are declared
/// here and checked once a draft has been assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FundDraft {
    #[validate(length(max = 20, message = "Ensure this field has no more than 20 characters."))]
    pub tax_id: String,
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub fund_class: String,
    pub strategy: String,
    pub notes: Option<String>,
    pub reports: Vec<String>,
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub master_fund_code: Option<String>,
    #[validate(length(max = 20, message = "Ensure this field has no more than 20 characters."))]
    pub master_fund_tax_id: Option<String>,
}

impl FundDraft {
    /// Creates a draft with the required fields and no optional data
    pub fn new(
        tax_id: impl Into<String>,
        fund_class: impl Into<String>,
        strategy: impl Into<String>,
    ) -> Self {
        Self {
            tax_id: tax_id.into(),
            fund_class: fund_class.into(),
            strategy: strategy.into(),
            notes: None,
            reports: Vec::new(),
            master_fund_code: None,
            master_fund_tax_id: None,
        }
    }

    /// Sets the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the report list
    pub fn with_reports<I, S>(mut self, reports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reports = reports.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the master fund reference
    pub fn with_master_fund(
        mut self,
        code: impl Into<String>,
        tax_id: impl Into<String>,
    ) -> Self {
        self.master_fund_code = Some(code.into());
        self.master_fund_tax_id = Some(tax_id.into());
        self
    }

    /// Materializes the draft as a stored record under the given id
    pub fn into_fund(self, id: FundId) -> Fund {
        Fund {
            id,
            tax_id: self.tax_id,
            fund_class: self.fund_class,
            strategy: self.strategy,
            notes: self.notes,
            reports: self.reports,
            master_fund_code: self.master_fund_code,
            master_fund_tax_id: self.master_fund_tax_id,
        }
    }
}

/// A partial update of a fund
///
/// `None` leaves a field untouched. For nullable fields the inner `Option`
/// is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundPatch {
    pub tax_id: Option<String>,
    pub fund_class: Option<String>,
    pub strategy: Option<String>,
    pub notes: Option<Option<String>>,
    pub reports: Option<Vec<String>>,
    pub master_fund_code: Option<Option<String>>,
    pub master_fund_tax_id: Option<Option<String>>,
}

impl FundPatch {
    /// Returns true if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == FundPatch::default()
    }

    /// Merges the patch over an existing record, producing the new draft
    pub fn apply_to(self, fund: &Fund) -> FundDraft {
        let current = fund.to_draft();
        FundDraft {
            tax_id: self.tax_id.unwrap_or(current.tax_id),
            fund_class: self.fund_class.unwrap_or(current.fund_class),
            strategy: self.strategy.unwrap_or(current.strategy),
            notes: self.notes.unwrap_or(current.notes),
            reports: self.reports.unwrap_or(current.reports),
            master_fund_code: self.master_fund_code.unwrap_or(current.master_fund_code),
            master_fund_tax_id: self.master_fund_tax_id.unwrap_or(current.master_fund_tax_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fund {
        FundDraft::new("12.345.678/0001-95", "Multimercados", "Quant/Sist")
            .with_reports(["MM Int"])
            .into_fund(FundId::new(1))
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "Fundo 12.345.678/0001-95");
    }

    #[test]
    fn test_patch_keeps_untouched_fields() {
        let fund = sample();
        let patch = FundPatch {
            strategy: Some("LS/Arb".to_string()),
            ..Default::default()
        };

        let draft = patch.apply_to(&fund);
        assert_eq!(draft.strategy, "LS/Arb");
        assert_eq!(draft.tax_id, fund.tax_id);
        assert_eq!(draft.reports, vec!["MM Int".to_string()]);
    }

    #[test]
    fn test_patch_can_clear_nullable_field() {
        let mut fund = sample();
        fund.notes = Some("old".to_string());
        let patch = FundPatch {
            notes: Some(None),
            ..Default::default()
        };

        assert_eq!(patch.apply_to(&fund).notes, None);
    }

    #[test]
    fn test_empty_patch() {
        assert!(FundPatch::default().is_empty());
    }

    #[test]
    fn test_draft_length_limits() {
        let draft = FundDraft::new("1".repeat(21), "Classe", "Estrategia");
        assert!(draft.validate().is_err());

        let draft = FundDraft::new("1".repeat(20), "Classe", "Estrategia");
        assert!(draft.validate().is_ok());
    }
}
