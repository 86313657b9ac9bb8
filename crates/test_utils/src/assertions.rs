//! Custom Test Assertions
//!
//! Assertion helpers for field errors and fund responses that print the
//! whole error map on failure.

use serde_json::Value;

use domain_fund::{FieldErrors, FundDraft, FundError};

/// Asserts that `errors` holds `message` for `field`
pub fn assert_field_error(errors: &FieldErrors, field: &str, message: &str) {
    let messages = errors
        .get(field)
        .unwrap_or_else(|| panic!("Expected errors for {}, got {}", field, errors));
    assert!(
        messages.iter().any(|m| m == message),
        "Expected {:?} for {}, got {:?}",
        message,
        field,
        messages
    );
}

/// Asserts that the error is a validation failure naming `field`
pub fn assert_validation_on(err: &FundError, field: &str) {
    match err {
        FundError::Validation(errors) => assert!(
            errors.contains(field),
            "Expected a validation error on {}, got {}",
            field,
            errors
        ),
        other => panic!("Expected a validation error on {}, got {:?}", field, other),
    }
}

/// Asserts that a JSON error body lists `message` under `field`
pub fn assert_json_field_error(body: &Value, field: &str, message: &str) {
    let messages = body
        .get(field)
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("Expected an error list for {}, got {}", field, body));
    assert!(
        messages.iter().any(|m| m.as_str() == Some(message)),
        "Expected {:?} for {}, got {}",
        message,
        field,
        body
    );
}

/// Asserts that a JSON fund record matches a draft field by field
pub fn assert_json_matches_draft(body: &Value, draft: &FundDraft) {
    assert_eq!(body["st_cnpj_fundo"], draft.tax_id.as_str(), "tax id in {}", body);
    assert_eq!(body["st_classe_fundo"], draft.fund_class.as_str(), "class in {}", body);
    assert_eq!(body["st_estrategia_fundo"], draft.strategy.as_str(), "strategy in {}", body);
    assert_eq!(body["st_obs_fundo"].as_str(), draft.notes.as_deref(), "notes in {}", body);
    assert_eq!(
        body["cod_quantum_fundomaster"].as_str(),
        draft.master_fund_code.as_deref(),
        "master fund code in {}",
        body
    );
    assert_eq!(
        body["st_cnpj_fundomaster"].as_str(),
        draft.master_fund_tax_id.as_deref(),
        "master fund tax id in {}",
        body
    );
    let reports: Vec<&str> = body["relatorios"]
        .as_array()
        .unwrap_or_else(|| panic!("relatorios is not a list in {}", body))
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(reports, draft.reports, "reports in {}", body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_field_error_passes() {
        let errors = FieldErrors::single("st_classe_fundo", "This field is required.");
        assert_field_error(&errors, "st_classe_fundo", "This field is required.");
    }

    #[test]
    #[should_panic(expected = "Expected errors for st_cnpj_fundo")]
    fn test_assert_field_error_fails_on_missing_field() {
        let errors = FieldErrors::single("st_classe_fundo", "This field is required.");
        assert_field_error(&errors, "st_cnpj_fundo", "This field is required.");
    }

    #[test]
    fn test_assert_json_field_error() {
        let message = domain_fund::validation::messages::not_a_list("string");
        let body = json!({ "relatorios": [message.clone()] });
        assert_json_field_error(&body, "relatorios", &message);
    }
}
