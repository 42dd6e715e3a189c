//! Public license validation endpoint
//!
//! Always answers 200: an invalid license is an expected outcome of the
//! check, not a failure of the check itself.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use gf_core::TenantSummary;
use serde::{Deserialize, Serialize};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub key: String,
    pub domain: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<TenantSummary>,
    pub timestamp: DateTime<Utc>,
}

pub async fn validate(
    State(state): State<AppState>,
    Json(input): Json<ValidateRequest>,
) -> Result<Json<ApiResponse<ValidateResult>>, ApiError> {
    let outcome = state.validator.validate(&input.key, &input.domain).await?;
    Ok(Json(ApiResponse::success(ValidateResult {
        valid: outcome.valid,
        reason: outcome.reason.map(|reason| reason.message()),
        details: outcome.tenant,
        timestamp: Utc::now(),
    })))
}
