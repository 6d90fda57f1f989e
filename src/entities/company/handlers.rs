//! Company HTTP handlers

use super::model::{CreateCompany, UpdateCompany};
use crate::core::error::{BiztimeError, BiztimeResult};
use crate::core::grouping::group_by_key;
use crate::core::validation::ValidatedJson;
use crate::server::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

pub async fn list_companies(State(state): State<AppState>) -> BiztimeResult<Json<Value>> {
    let companies = state.companies.list().await?;
    tracing::debug!(count = companies.len(), "listed companies");
    Ok(Json(json!({ "companies": companies })))
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> BiztimeResult<Json<Value>> {
    let rows = state.companies.get_with_industries(&code).await?;
    let company = match rows.first() {
        Some(row) => row.company(),
        None => return Err(BiztimeError::not_found("Company", "code", &code)),
    };

    let industries: Vec<String> = group_by_key(rows, |row| (row.code, row.ind_code))
        .into_values()
        .next()
        .unwrap_or_default();
    let invoices = state.invoices.list_for_company(&company.code).await?;

    Ok(Json(json!({
        "company": company,
        "invoices": invoices,
        "industries": industries,
    })))
}

pub async fn create_company(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCompany>,
) -> BiztimeResult<(StatusCode, Json<Value>)> {
    let company = state.companies.create(payload.into_new_company()?).await?;
    tracing::debug!(code = %company.code, "created company");
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

pub async fn update_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateCompany>,
) -> BiztimeResult<Json<Value>> {
    let company = state
        .companies
        .update(&code, payload.into_changes()?)
        .await?
        .ok_or_else(|| BiztimeError::not_found("Company", "code", &code))?;

    tracing::debug!(code = %company.code, "updated company");
    Ok(Json(json!({ "company": company })))
}

pub async fn delete_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> BiztimeResult<Json<Value>> {
    if !state.companies.delete(&code).await? {
        return Err(BiztimeError::not_found("Company", "code", &code));
    }

    tracing::debug!(%code, "deleted company");
    Ok(Json(json!({ "status": "deleted" })))
}
