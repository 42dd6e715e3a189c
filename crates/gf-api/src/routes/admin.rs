//! Admin endpoints

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use gf_core::AdminStats;

use crate::extract::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(stats))
}

pub async fn stats(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ApiResponse<AdminStats>>, ApiError> {
    let stats = state.stats.compose(&user_id).await?;
    Ok(Json(ApiResponse::success(stats)))
}
