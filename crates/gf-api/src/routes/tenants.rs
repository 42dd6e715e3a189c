//! Tenant management endpoints

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use gf_core::Tenant;
use gf_store::Page;
use serde::{Deserialize, Serialize};

use crate::extract::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tenants).post(create_tenant))
        .route("/:id", axum::routing::delete(delete_tenant))
        .route("/:id/suspend", post(suspend_tenant))
        .route("/:id/resume", post(resume_tenant))
}

#[derive(Debug, Deserialize)]
pub struct TenantCreate {
    pub name: String,
    pub domain: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDeleted {
    pub id: String,
    pub deleted: bool,
}

pub async fn list_tenants(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ApiResponse<Page<Tenant>>>, ApiError> {
    let page = state.tenants.list_for(&user_id).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn create_tenant(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(input): Json<TenantCreate>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant = state
        .tenants
        .create(&user_id, &input.name, &input.domain)
        .await?;
    Ok(Json(ApiResponse::success(tenant)))
}

pub async fn delete_tenant(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TenantDeleted>>, ApiError> {
    state.tenants.delete(&user_id, &id).await?;
    Ok(Json(ApiResponse::success(TenantDeleted {
        id,
        deleted: true,
    })))
}

pub async fn suspend_tenant(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant = state.tenants.set_suspended(&user_id, &id, true).await?;
    Ok(Json(ApiResponse::success(tenant)))
}

pub async fn resume_tenant(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant = state.tenants.set_suspended(&user_id, &id, false).await?;
    Ok(Json(ApiResponse::success(tenant)))
}
