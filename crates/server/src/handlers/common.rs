//! Shared handler helpers and health check.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use halftone_metadata::models::ComicRow;
use serde::Serialize;
use uuid::Uuid;

/// Header carrying the authenticated account ID, injected by the upstream
/// auth proxy. Authentication itself is out of scope for this service.
pub const ACCOUNT_HEADER: &str = "x-account-id";

/// Extract the authenticated account ID from request headers.
pub fn require_account(headers: &HeaderMap) -> ApiResult<String> {
    headers
        .get(ACCOUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {ACCOUNT_HEADER} header")))
}

/// Load a comic and verify it belongs to the given account.
pub async fn require_owned_comic(
    state: &AppState,
    comic_id: Uuid,
    owner_id: &str,
) -> ApiResult<ComicRow> {
    let comic = state
        .metadata
        .get_comic(comic_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("comic {comic_id} not found")))?;
    if comic.owner_id != owner_id {
        return Err(ApiError::Forbidden(format!(
            "comic {comic_id} is not owned by this account"
        )));
    }
    Ok(comic)
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /v1/health - Health check.
///
/// Intentionally unauthenticated for load balancers and k8s probes.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.metadata.health_check().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
