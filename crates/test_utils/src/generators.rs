//! Property-Based Test Generators
//!
//! Proptest strategies and fake-data helpers producing fund data that
//! satisfies the registry's field rules.

use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use proptest::prelude::*;

use domain_fund::{cnpj, FundDraft};

/// Strategy for unpunctuated, valid CNPJs
pub fn cnpj_digits_strategy() -> impl Strategy<Value = String> {
    proptest::array::uniform12(0u32..10u32)
        .prop_filter("repeated digits", |base| base.iter().any(|d| *d != base[0]))
        .prop_map(cnpj::complete)
}

/// Strategy for punctuated, valid CNPJs
pub fn cnpj_strategy() -> impl Strategy<Value = String> {
    cnpj_digits_strategy().prop_filter_map("unformattable", |digits| cnpj::format(&digits))
}

/// Strategy for fund classes within the column limit
pub fn fund_class_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Multimercados".to_string()),
        Just("Ações".to_string()),
        Just("Renda Fixa".to_string()),
        Just("Cambial".to_string()),
        "[A-Z][a-z]{2,30}",
    ]
}

/// Strategy for report lists
pub fn reports_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[A-Z][a-z ]{1,20}[a-z]", 0..5)
}

/// Strategy for valid drafts
pub fn fund_draft_strategy() -> impl Strategy<Value = FundDraft> {
    (
        cnpj_strategy(),
        fund_class_strategy(),
        "[A-Z][A-Za-z/ ]{0,40}[a-z]",
        reports_strategy(),
    )
        .prop_map(|(tax_id, class, strategy, reports)| {
            FundDraft::new(tax_id, class, strategy).with_reports(reports)
        })
}

/// Creates a draft with fake names and text around the given tax id
pub fn fake_fund_draft(tax_id: impl Into<String>) -> FundDraft {
    let class: String = CompanyName().fake();
    let strategy: String = Sentence(2..5).fake();
    let notes: String = Sentence(4..10).fake();
    FundDraft::new(tax_id, class, strategy).with_notes(notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_draft_is_accepted() {
        let draft = fake_fund_draft("11.222.333/0001-81");
        assert!(!draft.fund_class.trim().is_empty());
        assert!(draft.notes.is_some());
    }

    proptest! {
        #[test]
        fn generated_cnpjs_validate(tax_id in cnpj_strategy()) {
            prop_assert!(cnpj::has_valid_format(&tax_id));
            prop_assert!(cnpj::is_valid(&tax_id));
        }

        #[test]
        fn generated_drafts_fit_columns(draft in fund_draft_strategy()) {
            prop_assert!(draft.tax_id.chars().count() <= 20);
            prop_assert!(draft.fund_class.chars().count() <= 100);
        }
    }
}
