//! Fund validation rules
//!
//! This module turns an inbound JSON payload into a `FundDraft` (create and
//! full update) or a `FundPatch` (partial update), collecting every problem
//! into a `FieldErrors` map keyed by wire field name.
//!
//! # Validation Rules
//!
//! ## Required text fields (`st_cnpj_fundo`, `st_classe_fundo`, `st_estrategia_fundo`)
//! - Must be present (create and full update only)
//! - Must not be null or blank after trimming
//! - Numbers are accepted as their decimal text; other JSON types are rejected
//!
//! ## Optional text fields (`st_obs_fundo`, `cod_quantum_fundomaster`, `st_cnpj_fundomaster`)
//! - May be absent, null, or blank
//!
//! ## Reports (`relatorios`)
//! - Absent or null becomes an empty list
//! - Otherwise must be a list of non-blank strings
//!
//! ## Lengths
//! - Declared on `FundDraft` and checked with `validator`
//!
//! ## Strict tax ids
//! - When enabled, tax ids must be valid CNPJs and are stored punctuated

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use validator::Validate;

use crate::cnpj;
use crate::fund::{fields, FundDraft, FundPatch};

/// Error messages shared by the validator and the service layer
pub mod messages {
    pub const REQUIRED: &str = "This field is required.";
    pub const NULL: &str = "This field may not be null.";
    pub const BLANK: &str = "This field may not be blank.";
    pub const NOT_A_STRING: &str = "Not a valid string.";
    pub const INVALID_CNPJ: &str = "Invalid CNPJ.";
    pub const TAX_ID_TAKEN: &str = "fund with this st_cnpj_fundo already exists.";

    /// Key used for errors that do not belong to a single field
    pub const NON_FIELD: &str = "non_field_errors";

    pub fn not_a_list(type_name: &str) -> String {
        format!("Expected a list of items but got type \"{}\".", type_name)
    }

    pub fn not_an_object(type_name: &str) -> String {
        format!("Invalid data. Expected a dictionary, but got {}.", type_name)
    }

    pub fn item(index: usize, message: &str) -> String {
        format!("Item {}: {}", index, message)
    }
}

/// Validation errors keyed by wire field name
///
/// Serializes as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error set holding a single message
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Adds a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns true if no field has errors
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the field has at least one error
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns the names of the fields with errors
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merges another error set into this one
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// Converts into `Err(self)` when any errors were recorded
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut result = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let wire = wire_name(&field);
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", error.code));
                result.add(wire, message);
            }
        }
        result
    }
}

/// Maps a `FundDraft` field name to its wire name
fn wire_name(field: &str) -> &'static str {
    match field {
        "tax_id" => fields::TAX_ID,
        "fund_class" => fields::FUND_CLASS,
        "strategy" => fields::STRATEGY,
        "notes" => fields::NOTES,
        "reports" => fields::REPORTS,
        "master_fund_code" => fields::MASTER_FUND_CODE,
        "master_fund_tax_id" => fields::MASTER_FUND_TAX_ID,
        _ => messages::NON_FIELD,
    }
}

/// Returns the JSON type name of a value, for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads a scalar as trimmed text
fn read_text(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(messages::NOT_A_STRING),
    }
}

/// Reads a non-nullable, non-blank text field
///
/// Returns `None` if the key is absent or the value was rejected.
fn text_field(
    payload: &Map<String, Value>,
    field: &'static str,
    required: bool,
    errors: &mut FieldErrors,
) -> Option<String> {
    match payload.get(field) {
        None => {
            if required {
                errors.add(field, messages::REQUIRED);
            }
            None
        }
        Some(Value::Null) => {
            errors.add(field, messages::NULL);
            None
        }
        Some(value) => match read_text(value) {
            Ok(text) if text.is_empty() => {
                errors.add(field, messages::BLANK);
                None
            }
            Ok(text) => Some(text),
            Err(message) => {
                errors.add(field, message);
                None
            }
        },
    }
}

/// Reads a nullable text field where blank is allowed
///
/// The outer `Option` is `None` if the key is absent or rejected.
fn nullable_text_field(
    payload: &Map<String, Value>,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Option<Option<String>> {
    match payload.get(field) {
        None => None,
        Some(Value::Null) => Some(None),
        Some(value) => match read_text(value) {
            Ok(text) => Some(Some(text)),
            Err(message) => {
                errors.add(field, message);
                None
            }
        },
    }
}

/// Reads the report list, normalizing null to an empty list
fn reports_field(payload: &Map<String, Value>, errors: &mut FieldErrors) -> Option<Vec<String>> {
    let items = match payload.get(fields::REPORTS) {
        None => return None,
        Some(Value::Null) => return Some(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            errors.add(fields::REPORTS, messages::not_a_list(json_type_name(other)));
            return None;
        }
    };

    let mut reports = Vec::with_capacity(items.len());
    let before = errors.get(fields::REPORTS).map_or(0, <[String]>::len);
    for (index, item) in items.iter().enumerate() {
        let text = match item {
            Value::Null => Err(messages::NULL),
            other => read_text(other).and_then(|t| if t.is_empty() { Err(messages::BLANK) } else { Ok(t) }),
        };
        match text {
            Ok(text) => reports.push(text),
            Err(message) => errors.add(fields::REPORTS, messages::item(index, message)),
        }
    }

    let after = errors.get(fields::REPORTS).map_or(0, <[String]>::len);
    if after > before {
        None
    } else {
        Some(reports)
    }
}

/// Validator for inbound fund payloads
///
/// # Examples
///
/// ```rust
/// use domain_fund::validation::FundValidator;
/// use serde_json::json;
///
/// let validator = FundValidator::new();
/// let draft = validator
///     .validate_create(&json!({
///         "st_cnpj_fundo": "11.222.333/0001-81",
///         "st_classe_fundo": "Multimercados",
///         "st_estrategia_fundo": "Quant/Sist",
///         "relatorios": null
///     }))
///     .unwrap();
///
/// assert!(draft.reports.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FundValidator {
    strict_tax_id: bool,
}

impl FundValidator {
    /// Creates a validator with strict tax-id checking disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables CNPJ verification of tax ids
    pub fn strict_tax_id(mut self, strict: bool) -> Self {
        self.strict_tax_id = strict;
        self
    }

    /// Returns true when tax ids are verified as CNPJs
    pub fn is_strict(&self) -> bool {
        self.strict_tax_id
    }

    /// Validates a payload for create or full update
    ///
    /// # Errors
    ///
    /// Returns every offending field with its messages
    pub fn validate_create(&self, payload: &Value) -> Result<FundDraft, FieldErrors> {
        let payload = as_object(payload)?;
        let mut errors = FieldErrors::new();

        let tax_id = text_field(payload, fields::TAX_ID, true, &mut errors);
        let fund_class = text_field(payload, fields::FUND_CLASS, true, &mut errors);
        let strategy = text_field(payload, fields::STRATEGY, true, &mut errors);
        let notes = nullable_text_field(payload, fields::NOTES, &mut errors).flatten();
        let reports = reports_field(payload, &mut errors).unwrap_or_default();
        let master_fund_code =
            nullable_text_field(payload, fields::MASTER_FUND_CODE, &mut errors).flatten();
        let master_fund_tax_id =
            nullable_text_field(payload, fields::MASTER_FUND_TAX_ID, &mut errors).flatten();

        // Rejected fields become empty placeholders, which pass every length
        // limit, so only accepted values are length-checked.
        let draft = FundDraft {
            tax_id: tax_id.unwrap_or_default(),
            fund_class: fund_class.unwrap_or_default(),
            strategy: strategy.unwrap_or_default(),
            notes,
            reports,
            master_fund_code,
            master_fund_tax_id,
        };

        self.check_limits(&draft, &mut errors);
        errors.into_result(self.canonicalize(draft))
    }

    /// Validates a payload for partial update
    ///
    /// Only keys present in the payload are checked; required fields may be
    /// omitted but not nulled or blanked.
    ///
    /// # Errors
    ///
    /// Returns every offending field with its messages
    pub fn validate_patch(&self, payload: &Value) -> Result<FundPatch, FieldErrors> {
        let payload = as_object(payload)?;
        let mut errors = FieldErrors::new();

        let patch = FundPatch {
            tax_id: text_field(payload, fields::TAX_ID, false, &mut errors),
            fund_class: text_field(payload, fields::FUND_CLASS, false, &mut errors),
            strategy: text_field(payload, fields::STRATEGY, false, &mut errors),
            notes: nullable_text_field(payload, fields::NOTES, &mut errors),
            reports: reports_field(payload, &mut errors),
            master_fund_code: nullable_text_field(payload, fields::MASTER_FUND_CODE, &mut errors),
            master_fund_tax_id: nullable_text_field(payload, fields::MASTER_FUND_TAX_ID, &mut errors),
        };

        let candidate = FundDraft {
            tax_id: patch.tax_id.clone().unwrap_or_default(),
            fund_class: patch.fund_class.clone().unwrap_or_default(),
            strategy: patch.strategy.clone().unwrap_or_default(),
            notes: None,
            reports: Vec::new(),
            master_fund_code: patch.master_fund_code.clone().flatten(),
            master_fund_tax_id: patch.master_fund_tax_id.clone().flatten(),
        };
        self.check_limits(&candidate, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        let patch = FundPatch {
            tax_id: patch.tax_id.map(|t| self.canonical_tax_id(t)),
            master_fund_tax_id: patch
                .master_fund_tax_id
                .map(|t| t.map(|t| self.canonical_tax_id(t))),
            ..patch
        };
        Ok(patch)
    }

    /// Checks length limits and, in strict mode, CNPJ validity
    ///
    /// Fields that already carry an error are not checked again.
    fn check_limits(&self, draft: &FundDraft, errors: &mut FieldErrors) {
        let mut found = FieldErrors::new();
        if let Err(e) = draft.validate() {
            found.merge(e.into());
        }

        if self.strict_tax_id {
            let tax_ids = [
                (fields::TAX_ID, Some(draft.tax_id.as_str())),
                (fields::MASTER_FUND_TAX_ID, draft.master_fund_tax_id.as_deref()),
            ];
            for (field, value) in tax_ids {
                let Some(value) = value.filter(|v| !v.is_empty()) else {
                    continue;
                };
                if !found.contains(field) && !cnpj::is_valid(value) {
                    found.add(field, messages::INVALID_CNPJ);
                }
            }
        }

        for field in found.fields().map(str::to_string).collect::<Vec<_>>() {
            if errors.contains(&field) {
                continue;
            }
            for message in found.get(&field).unwrap_or_default() {
                errors.add(field.clone(), message.clone());
            }
        }
    }

    fn canonical_tax_id(&self, value: String) -> String {
        if self.strict_tax_id && !value.is_empty() {
            cnpj::format(&value).unwrap_or(value)
        } else {
            value
        }
    }

    fn canonicalize(&self, draft: FundDraft) -> FundDraft {
        FundDraft {
            tax_id: self.canonical_tax_id(draft.tax_id),
            master_fund_tax_id: draft.master_fund_tax_id.map(|t| self.canonical_tax_id(t)),
            ..draft
        }
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    payload.as_object().ok_or_else(|| {
        FieldErrors::single(
            messages::NON_FIELD,
            messages::not_an_object(json_type_name(payload)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "st_cnpj_fundo": "11.222.333/0001-81",
            "st_classe_fundo": "RV Int'l USD",
            "st_estrategia_fundo": "RV Asia USD",
        })
    }

    #[test]
    fn test_minimal_payload_is_valid() {
        let draft = FundValidator::new().validate_create(&valid_payload()).unwrap();
        assert_eq!(draft.tax_id, "11.222.333/0001-81");
        assert!(draft.reports.is_empty());
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let errors = FundValidator::new().validate_create(&json!({})).unwrap_err();
        assert_eq!(errors.get(fields::TAX_ID), Some(&[messages::REQUIRED.to_string()][..]));
        assert!(errors.contains(fields::FUND_CLASS));
        assert!(errors.contains(fields::STRATEGY));
        assert!(!errors.contains(fields::NOTES));
    }

    #[test]
    fn test_blank_and_null() {
        let mut payload = valid_payload();
        payload["st_classe_fundo"] = json!("   ");
        payload["st_estrategia_fundo"] = Value::Null;

        let errors = FundValidator::new().validate_create(&payload).unwrap_err();
        assert_eq!(errors.get(fields::FUND_CLASS).unwrap()[0], messages::BLANK);
        assert_eq!(errors.get(fields::STRATEGY).unwrap()[0], messages::NULL);
    }

    #[test]
    fn test_reports_null_normalized() {
        let mut payload = valid_payload();
        payload["relatorios"] = Value::Null;
        let draft = FundValidator::new().validate_create(&payload).unwrap();
        assert_eq!(draft.reports, Vec::<String>::new());
    }

    #[test]
    fn test_reports_wrong_type() {
        let mut payload = valid_payload();
        payload["relatorios"] = json!("MM Int");
        let errors = FundValidator::new().validate_create(&payload).unwrap_err();
        assert_eq!(
            errors.get(fields::REPORTS).unwrap()[0],
            "Expected a list of items but got type \"string\"."
        );
    }

    #[test]
    fn test_reports_item_errors() {
        let mut payload = valid_payload();
        payload["relatorios"] = json!(["ok", "", null]);
        let errors = FundValidator::new().validate_create(&payload).unwrap_err();
        let messages = errors.get(fields::REPORTS).unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Item 1:"));
        assert!(messages[1].starts_with("Item 2:"));
    }

    #[test]
    fn test_length_limit_reported_with_shape_errors() {
        let payload = json!({
            "st_cnpj_fundo": "1".repeat(21),
            "st_estrategia_fundo": "x",
        });
        let errors = FundValidator::new().validate_create(&payload).unwrap_err();
        assert_eq!(
            errors.get(fields::TAX_ID).unwrap()[0],
            "Ensure this field has no more than 20 characters."
        );
        assert!(errors.contains(fields::FUND_CLASS));
    }

    #[test]
    fn test_numbers_accepted_as_text() {
        let mut payload = valid_payload();
        payload["cod_quantum_fundomaster"] = json!(4411);
        let draft = FundValidator::new().validate_create(&payload).unwrap();
        assert_eq!(draft.master_fund_code.as_deref(), Some("4411"));
    }

    #[test]
    fn test_booleans_rejected() {
        let mut payload = valid_payload();
        payload["st_obs_fundo"] = json!(true);
        let errors = FundValidator::new().validate_create(&payload).unwrap_err();
        assert_eq!(errors.get(fields::NOTES).unwrap()[0], messages::NOT_A_STRING);
    }

    #[test]
    fn test_non_object_body() {
        let errors = FundValidator::new().validate_create(&json!([1, 2])).unwrap_err();
        assert_eq!(
            errors.get(messages::NON_FIELD).unwrap()[0],
            "Invalid data. Expected a dictionary, but got array."
        );
    }

    #[test]
    fn test_unknown_keys_and_id_ignored() {
        let mut payload = valid_payload();
        payload["id"] = json!(999);
        payload["extra"] = json!({"a": 1});
        assert!(FundValidator::new().validate_create(&payload).is_ok());
    }

    #[test]
    fn test_patch_only_checks_present_keys() {
        let patch = FundValidator::new()
            .validate_patch(&json!({"st_obs_fundo": "nova obs"}))
            .unwrap();
        assert_eq!(patch.notes, Some(Some("nova obs".to_string())));
        assert_eq!(patch.tax_id, None);
    }

    #[test]
    fn test_patch_rejects_blank_required() {
        let errors = FundValidator::new()
            .validate_patch(&json!({"st_classe_fundo": ""}))
            .unwrap_err();
        assert!(errors.contains(fields::FUND_CLASS));
    }

    #[test]
    fn test_strict_mode_rejects_bad_cnpj() {
        let mut payload = valid_payload();
        payload["st_cnpj_fundo"] = json!("11.222.333/0001-82");
        let errors = FundValidator::new()
            .strict_tax_id(true)
            .validate_create(&payload)
            .unwrap_err();
        assert_eq!(errors.get(fields::TAX_ID).unwrap()[0], messages::INVALID_CNPJ);
    }

    #[test]
    fn test_strict_mode_formats_cnpj() {
        let mut payload = valid_payload();
        payload["st_cnpj_fundo"] = json!("11222333000181");
        payload["st_cnpj_fundomaster"] = json!("");
        let draft = FundValidator::new()
            .strict_tax_id(true)
            .validate_create(&payload)
            .unwrap();
        assert_eq!(draft.tax_id, "11.222.333/0001-81");
        assert_eq!(draft.master_fund_tax_id.as_deref(), Some(""));
    }

    #[test]
    fn test_lenient_mode_keeps_tax_id_verbatim() {
        let mut payload = valid_payload();
        payload["st_cnpj_fundo"] = json!(" ABC-123 ");
        let draft = FundValidator::new().validate_create(&payload).unwrap();
        assert_eq!(draft.tax_id, "ABC-123");
    }
}
