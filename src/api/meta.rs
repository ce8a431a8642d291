//! Dashboard meta endpoints.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;

use super::{ack, Ack, ApiResult};
use crate::auth;
use crate::AppState;

/// Public dashboard configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub app_title: String,
    pub due_date: Option<String>,
}

/// GET /api/config - Title and due date for the dashboard header.
pub async fn get_config(State(state): State<AppState>) -> Json<AppInfo> {
    Json(AppInfo {
        app_title: state.config.app_title.clone(),
        due_date: state.config.due_date.clone(),
    })
}

/// GET /api/verify-pin - Check the supplied admin PIN.
pub async fn verify_pin(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Ack> {
    auth::require_pin(&state.config, &headers)?;
    Ok(ack())
}
