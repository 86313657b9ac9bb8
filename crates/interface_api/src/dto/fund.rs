//! Fund DTOs
//!
//! Inbound payloads are validated from raw JSON by
//! `domain_fund::FundValidator` so that missing, null and mistyped fields can
//! be told apart. Outbound records use `FundResponse`.

use serde::{Deserialize, Serialize};

use domain_fund::Fund;

/// A fund as returned by every endpoint
///
/// `relatorios` is always an array; absent optional fields are `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundResponse {
    pub id: i64,
    pub st_cnpj_fundo: String,
    pub st_classe_fundo: String,
    pub st_estrategia_fundo: String,
    pub st_obs_fundo: Option<String>,
    #[serde(default)]
    pub relatorios: Vec<String>,
    pub cod_quantum_fundomaster: Option<String>,
    pub st_cnpj_fundomaster: Option<String>,
}

impl From<Fund> for FundResponse {
    fn from(fund: Fund) -> Self {
        Self {
            id: fund.id.value(),
            st_cnpj_fundo: fund.tax_id,
            st_classe_fundo: fund.fund_class,
            st_estrategia_fundo: fund.strategy,
            st_obs_fundo: fund.notes,
            relatorios: fund.reports,
            cod_quantum_fundomaster: fund.master_fund_code,
            st_cnpj_fundomaster: fund.master_fund_tax_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::FundId;
    use domain_fund::FundDraft;
    use serde_json::json;

    #[test]
    fn test_serializes_all_fields() {
        let fund = FundDraft::new("11.222.333/0001-81", "Multimercados", "LS/Arb")
            .into_fund(FundId::new(8));

        let value = serde_json::to_value(FundResponse::from(fund)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 8,
                "st_cnpj_fundo": "11.222.333/0001-81",
                "st_classe_fundo": "Multimercados",
                "st_estrategia_fundo": "LS/Arb",
                "st_obs_fundo": null,
                "relatorios": [],
                "cod_quantum_fundomaster": null,
                "st_cnpj_fundomaster": null
            })
        );
    }
}
