//! Pre-built Test Fixtures
//!
//! Ready-to-use tax ids, drafts and payloads. Every CNPJ here carries valid
//! check digits, so the fixtures also pass strict tax-id validation.

use domain_fund::FundDraft;
use serde_json::{json, Value};

/// Fixture for tax ids
pub struct TaxIdFixtures;

impl TaxIdFixtures {
    /// Primary fund tax id (punctuated)
    pub fn primary() -> &'static str {
        "11.222.333/0001-81"
    }

    /// Primary fund tax id without punctuation
    pub fn primary_digits() -> &'static str {
        "11222333000181"
    }

    /// A second, distinct fund tax id
    pub fn secondary() -> &'static str {
        "11.444.777/0001-61"
    }

    /// Tax id of a master fund
    pub fn master() -> &'static str {
        "12.345.678/0001-95"
    }

    /// Correct format, wrong check digits
    pub fn bad_check_digits() -> &'static str {
        "11.222.333/0001-82"
    }

    /// Repeated digits pass the checksum but are not a CNPJ
    pub fn repeated_digits() -> &'static str {
        "11.111.111/1111-11"
    }
}

/// Fixture for fund drafts
pub struct FundFixtures;

impl FundFixtures {
    /// A multi-strategy fund with no optional data
    pub fn multimercado() -> FundDraft {
        FundDraft::new(TaxIdFixtures::primary(), "Multimercados", "LS/Arb")
    }

    /// A feeder fund with notes, reports and a master fund
    pub fn feeder() -> FundDraft {
        FundDraft::new(TaxIdFixtures::secondary(), "Ações", "Long Only")
            .with_notes("Fundo espelho")
            .with_reports(["Carta Mensal", "Lâmina"])
            .with_master_fund("QTM-001", TaxIdFixtures::master())
    }
}

/// Fixture for request payloads
pub struct PayloadFixtures;

impl PayloadFixtures {
    /// The smallest accepted create payload
    pub fn minimal() -> Value {
        json!({
            "st_cnpj_fundo": TaxIdFixtures::primary(),
            "st_classe_fundo": "Multimercados",
            "st_estrategia_fundo": "LS/Arb"
        })
    }

    /// A create payload with every field populated
    pub fn complete() -> Value {
        json!({
            "st_cnpj_fundo": TaxIdFixtures::secondary(),
            "st_classe_fundo": "Ações",
            "st_estrategia_fundo": "Long Only",
            "st_obs_fundo": "Fundo espelho",
            "relatorios": ["Carta Mensal", "Lâmina"],
            "cod_quantum_fundomaster": "QTM-001",
            "st_cnpj_fundomaster": TaxIdFixtures::master()
        })
    }

    /// A payload missing `st_classe_fundo`
    pub fn missing_class() -> Value {
        json!({
            "st_cnpj_fundo": TaxIdFixtures::primary(),
            "st_estrategia_fundo": "LS/Arb"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_fund::cnpj;

    #[test]
    fn test_tax_id_fixtures_are_valid_cnpjs() {
        assert!(cnpj::is_valid(TaxIdFixtures::primary()));
        assert!(cnpj::is_valid(TaxIdFixtures::primary_digits()));
        assert!(cnpj::is_valid(TaxIdFixtures::secondary()));
        assert!(cnpj::is_valid(TaxIdFixtures::master()));
        assert!(!cnpj::is_valid(TaxIdFixtures::bad_check_digits()));
        assert!(!cnpj::is_valid(TaxIdFixtures::repeated_digits()));
    }

    #[test]
    fn test_feeder_has_master_fund() {
        let feeder = FundFixtures::feeder();
        assert_eq!(feeder.master_fund_tax_id.as_deref(), Some(TaxIdFixtures::master()));
        assert_eq!(feeder.reports.len(), 2);
    }
}
