//! Test Data Builders
//!
//! `FundPayloadBuilder` produces request bodies with sensible defaults. Tests
//! set only the fields they care about, and can drop or null any field to
//! exercise validation.

use serde_json::{Map, Value};

use domain_fund::{fields, FundDraft};

use crate::fixtures::TaxIdFixtures;

/// Builder for fund request payloads
#[derive(Debug, Clone)]
pub struct FundPayloadBuilder {
    body: Map<String, Value>,
}

impl Default for FundPayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FundPayloadBuilder {
    /// Creates a builder holding the three required fields
    pub fn new() -> Self {
        Self::empty()
            .with_tax_id(TaxIdFixtures::primary())
            .with_class("Multimercados")
            .with_strategy("LS/Arb")
    }

    /// Creates a builder with no fields at all
    pub fn empty() -> Self {
        Self { body: Map::new() }
    }

    /// Starts from an existing draft
    pub fn from_draft(draft: &FundDraft) -> Self {
        let mut builder = Self::empty()
            .with_tax_id(&draft.tax_id)
            .with_class(&draft.fund_class)
            .with_strategy(&draft.strategy)
            .with_reports(draft.reports.iter().map(String::as_str));
        if let Some(notes) = &draft.notes {
            builder = builder.with_notes(notes);
        }
        if let Some(code) = &draft.master_fund_code {
            builder = builder.with_field(fields::MASTER_FUND_CODE, code.as_str());
        }
        if let Some(tax_id) = &draft.master_fund_tax_id {
            builder = builder.with_field(fields::MASTER_FUND_TAX_ID, tax_id.as_str());
        }
        builder
    }

    /// Sets `st_cnpj_fundo`
    pub fn with_tax_id(self, tax_id: impl Into<String>) -> Self {
        self.with_field(fields::TAX_ID, tax_id.into())
    }

    /// Sets `st_classe_fundo`
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_field(fields::FUND_CLASS, class.into())
    }

    /// Sets `st_estrategia_fundo`
    pub fn with_strategy(self, strategy: impl Into<String>) -> Self {
        self.with_field(fields::STRATEGY, strategy.into())
    }

    /// Sets `st_obs_fundo`
    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        self.with_field(fields::NOTES, notes.into())
    }

    /// Sets `relatorios`
    pub fn with_reports<'a>(self, reports: impl IntoIterator<Item = &'a str>) -> Self {
        let reports: Vec<Value> = reports.into_iter().map(Value::from).collect();
        self.with_field(fields::REPORTS, reports)
    }

    /// Sets both master fund fields
    pub fn with_master_fund(self, code: impl Into<String>, tax_id: impl Into<String>) -> Self {
        self.with_field(fields::MASTER_FUND_CODE, code.into())
            .with_field(fields::MASTER_FUND_TAX_ID, tax_id.into())
    }

    /// Sets any field to any JSON value
    pub fn with_field(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.body.insert(field.to_string(), value.into());
        self
    }

    /// Sets a field to `null`
    pub fn with_null(self, field: &str) -> Self {
        self.with_field(field, Value::Null)
    }

    /// Removes a field
    pub fn without(mut self, field: &str) -> Self {
        self.body.remove(field);
        self
    }

    /// Builds the JSON payload
    pub fn build(self) -> Value {
        Value::Object(self.body)
    }

    /// Builds the payload as a request body string
    pub fn build_string(self) -> String {
        self.build().to_string()
    }
}
