//! Invoice HTTP handlers

use super::model::{CreateInvoice, InvoiceDetail, UpdateInvoice};
use crate::core::error::{BiztimeError, BiztimeResult};
use crate::core::payment::plan_update;
use crate::core::validation::ValidatedJson;
use crate::server::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde_json::{Value, json};

/// Invoice ids are integers; any other path segment cannot name a row.
fn parse_id(raw: &str) -> BiztimeResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| BiztimeError::not_found("Invoice", "id", raw))
}

pub async fn list_invoices(State(state): State<AppState>) -> BiztimeResult<Json<Value>> {
    let invoices = state.invoices.list().await?;
    tracing::debug!(count = invoices.len(), "listed invoices");
    Ok(Json(json!({ "invoices": invoices })))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> BiztimeResult<Json<Value>> {
    let id = parse_id(&id)?;
    let invoice = state
        .invoices
        .get_with_company(id)
        .await?
        .map(InvoiceDetail::from)
        .ok_or_else(|| BiztimeError::not_found("Invoice", "id", id))?;

    Ok(Json(json!({ "invoice": invoice })))
}

pub async fn create_invoice(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateInvoice>,
) -> BiztimeResult<(StatusCode, Json<Value>)> {
    let invoice = state.invoices.create(payload.into_new_invoice()?).await?;
    tracing::debug!(id = invoice.id, comp_code = %invoice.comp_code, "created invoice");
    Ok((StatusCode::CREATED, Json(json!({ "invoice": invoice }))))
}

/// Update the amount and payment status of an invoice
///
/// The current row is read first so the payment transition can be computed
/// from the persisted `paid` flag. Read and write are separate statements.
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateInvoice>,
) -> BiztimeResult<Json<Value>> {
    let (amt, paid) = payload.into_request()?;
    let id = parse_id(&id)?;

    let current = state
        .invoices
        .get(id)
        .await?
        .ok_or_else(|| BiztimeError::not_found("Invoice", "id", id))?;

    let update = plan_update(current.payment_state(), amt, paid, Utc::now());
    let invoice = state
        .invoices
        .update(id, update)
        .await?
        .ok_or_else(|| BiztimeError::not_found("Invoice", "id", id))?;

    tracing::debug!(id, paid = invoice.paid, "updated invoice");
    Ok(Json(json!({ "invoice": invoice })))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> BiztimeResult<Json<Value>> {
    let id = parse_id(&id)?;
    if !state.invoices.delete(id).await? {
        return Err(BiztimeError::not_found("Invoice", "id", id));
    }

    tracing::debug!(id, "deleted invoice");
    Ok(Json(json!({ "status": "deleted" })))
}
