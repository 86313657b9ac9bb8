//! Fund handlers
//!
//! Two entry points reach the same service:
//!
//! - `create_fundo`: the dedicated create endpoint. Validation errors are
//!   returned as a field map; any other failure becomes a bare
//!   `{"error": "..."}` with status 500.
//! - the resource set (`list_funds` .. `delete_fund`): standard CRUD, errors
//!   rendered through `ApiError`.
//!
//! Both report a taken tax id as a 400 field error on `st_cnpj_fundo`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use core_kernel::FundId;
use domain_fund::FundError;

use crate::{AppState, error::ApiError};
use crate::dto::fund::FundResponse;

/// Parses the id path segment; anything that is not a fund id is absent
fn parse_id(raw: &str) -> Result<FundId, ApiError> {
    raw.parse::<FundId>()
        .map_err(|_| ApiError::NotFound(format!("Fund {} not found", raw)))
}

/// Creates a fund (dedicated endpoint)
pub async fn create_fundo(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<FundResponse>), ApiError> {
    let Json(payload) = payload?;

    match state.funds.create(&payload).await {
        Ok(fund) => Ok((StatusCode::CREATED, Json(fund.into()))),
        Err(FundError::Validation(errors)) => Err(ApiError::Validation(errors)),
        Err(other) => Err(ApiError::Unhandled(other.to_string())),
    }
}

/// Lists funds
pub async fn list_funds(
    State(state): State<AppState>,
) -> Result<Json<Vec<FundResponse>>, ApiError> {
    let funds = state.funds.list().await?;
    Ok(Json(funds.into_iter().map(FundResponse::from).collect()))
}

/// Gets a fund
pub async fn get_fund(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FundResponse>, ApiError> {
    let id = parse_id(&id)?;
    let fund = state.funds.retrieve(id).await?;
    Ok(Json(fund.into()))
}

/// Creates a fund (resource endpoint)
pub async fn create_fund(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<FundResponse>), ApiError> {
    let Json(payload) = payload?;
    let fund = state.funds.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(fund.into())))
}

/// Replaces a fund
pub async fn update_fund(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FundResponse>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let fund = state.funds.replace(id, &payload).await?;
    Ok(Json(fund.into()))
}

/// Partially updates a fund
pub async fn patch_fund(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FundResponse>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let fund = state.funds.partial_update(id, &payload).await?;
    Ok(Json(fund.into()))
}

/// Deletes a fund
pub async fn delete_fund(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.funds.destroy(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
