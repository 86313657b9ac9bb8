//! Fund repository implementation
//!
//! Database access for the `fundos` table. The report list is stored as a
//! JSONB array and is never null.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for fund records
#[derive(Debug, Clone)]
pub struct FundRepository {
    pool: PgPool,
}

impl FundRepository {
    /// Creates a new FundRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves all funds ordered by id
    pub async fn list(&self) -> Result<Vec<FundRow>, DatabaseError> {
        let funds = sqlx::query_as::<_, FundRow>(
            r#"
            SELECT
                id,
                st_cnpj_fundo,
                st_classe_fundo,
                st_estrategia_fundo,
                st_obs_fundo,
                relatorios,
                cod_quantum_fundomaster,
                st_cnpj_fundomaster
            FROM fundos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(funds)
    }

    /// Retrieves a fund by id
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` if no row has this id
    pub async fn get_by_id(&self, id: i64) -> Result<FundRow, DatabaseError> {
        sqlx::query_as::<_, FundRow>(
            r#"
            SELECT
                id,
                st_cnpj_fundo,
                st_classe_fundo,
                st_estrategia_fundo,
                st_obs_fundo,
                relatorios,
                cod_quantum_fundomaster,
                st_cnpj_fundomaster
            FROM fundos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Fund", id))
    }

    /// Retrieves the fund holding a tax id, if any
    pub async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<FundRow>, DatabaseError> {
        let fund = sqlx::query_as::<_, FundRow>(
            r#"
            SELECT
                id,
                st_cnpj_fundo,
                st_classe_fundo,
                st_estrategia_fundo,
                st_obs_fundo,
                relatorios,
                cod_quantum_fundomaster,
                st_cnpj_fundomaster
            FROM fundos
            WHERE st_cnpj_fundo = $1
            "#,
        )
        .bind(tax_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(fund)
    }

    /// Inserts a fund and returns the stored row
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` if the tax id is already registered
    pub async fn insert(&self, fund: &NewFund<'_>) -> Result<FundRow, DatabaseError> {
        let row = sqlx::query_as::<_, FundRow>(
            r#"
            INSERT INTO fundos (
                st_cnpj_fundo, st_classe_fundo, st_estrategia_fundo, st_obs_fundo,
                relatorios, cod_quantum_fundomaster, st_cnpj_fundomaster
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, st_cnpj_fundo, st_classe_fundo, st_estrategia_fundo, st_obs_fundo,
                relatorios, cod_quantum_fundomaster, st_cnpj_fundomaster
            "#,
        )
        .bind(fund.st_cnpj_fundo)
        .bind(fund.st_classe_fundo)
        .bind(fund.st_estrategia_fundo)
        .bind(fund.st_obs_fundo)
        .bind(Json(fund.relatorios))
        .bind(fund.cod_quantum_fundomaster)
        .bind(fund.st_cnpj_fundomaster)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Overwrites every writable column of a fund
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` if no row has this id,
    /// `DatabaseError::DuplicateEntry` if the tax id belongs to another fund
    pub async fn update(&self, id: i64, fund: &NewFund<'_>) -> Result<FundRow, DatabaseError> {
        sqlx::query_as::<_, FundRow>(
            r#"
            UPDATE fundos SET
                st_cnpj_fundo = $2,
                st_classe_fundo = $3,
                st_estrategia_fundo = $4,
                st_obs_fundo = $5,
                relatorios = $6,
                cod_quantum_fundomaster = $7,
                st_cnpj_fundomaster = $8
            WHERE id = $1
            RETURNING
                id, st_cnpj_fundo, st_classe_fundo, st_estrategia_fundo, st_obs_fundo,
                relatorios, cod_quantum_fundomaster, st_cnpj_fundomaster
            "#,
        )
        .bind(id)
        .bind(fund.st_cnpj_fundo)
        .bind(fund.st_classe_fundo)
        .bind(fund.st_estrategia_fundo)
        .bind(fund.st_obs_fundo)
        .bind(Json(fund.relatorios))
        .bind(fund.cod_quantum_fundomaster)
        .bind(fund.st_cnpj_fundomaster)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Fund", id))
    }

    /// Deletes a fund
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` if no row has this id
    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM fundos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Fund", id));
        }
        Ok(())
    }
}

/// Database row for a fund
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FundRow {
    pub id: i64,
    pub st_cnpj_fundo: String,
    pub st_classe_fundo: String,
    pub st_estrategia_fundo: String,
    pub st_obs_fundo: Option<String>,
    pub relatorios: Json<Vec<String>>,
    pub cod_quantum_fundomaster: Option<String>,
    pub st_cnpj_fundomaster: Option<String>,
}

/// Column values for an insert or full update
#[derive(Debug, Clone, Copy)]
pub struct NewFund<'a> {
    pub st_cnpj_fundo: &'a str,
    pub st_classe_fundo: &'a str,
    pub st_estrategia_fundo: &'a str,
    pub st_obs_fundo: Option<&'a str>,
    pub relatorios: &'a [String],
    pub cod_quantum_fundomaster: Option<&'a str>,
    pub st_cnpj_fundomaster: Option<&'a str>,
}
