//! Industry HTTP handlers

use super::model::{AssociateCompany, CreateIndustry, IndustryCompanyRow, IndustryListing};
use crate::core::error::BiztimeResult;
use crate::core::grouping::group_by_key;
use crate::core::validation::ValidatedJson;
use crate::server::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

/// Fold joined rows into one listing per industry, in row order
fn listings(rows: Vec<IndustryCompanyRow>) -> Vec<IndustryListing> {
    group_by_key(rows, |row| ((row.code, row.industry), row.comp_code))
        .into_iter()
        .map(|((code, industry), companies)| IndustryListing {
            code,
            industry,
            companies,
        })
        .collect()
}

pub async fn list_industries(State(state): State<AppState>) -> BiztimeResult<Json<Value>> {
    let rows = state.industries.list_with_companies().await?;
    let industries = listings(rows);
    tracing::debug!(count = industries.len(), "listed industries");
    Ok(Json(json!({ "industries": industries })))
}

pub async fn create_industry(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateIndustry>,
) -> BiztimeResult<(StatusCode, Json<Value>)> {
    let industry = state.industries.create(payload.into_industry()?).await?;
    tracing::debug!(code = %industry.code, "created industry");
    Ok((StatusCode::CREATED, Json(json!({ "industry": industry }))))
}

/// Associate an existing company with an existing industry
pub async fn associate_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ValidatedJson(payload): ValidatedJson<AssociateCompany>,
) -> BiztimeResult<(StatusCode, Json<Value>)> {
    let comp_code = payload.into_comp_code()?;
    let created = state.industries.associate(&code, &comp_code).await?;
    tracing::debug!(ind_code = %created.ind_code, comp_code = %created.comp_code, "associated company");
    Ok((StatusCode::CREATED, Json(json!({ "created": created }))))
}
