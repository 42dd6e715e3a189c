//! Billing endpoints

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use gf_core::Invoice;

use crate::extract::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/invoices", get(list_invoices))
}

pub async fn list_invoices(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ApiResponse<Vec<Invoice>>>, ApiError> {
    let invoices = state.invoices.list_for(&user_id).await?;
    Ok(Json(ApiResponse::success(invoices)))
}
