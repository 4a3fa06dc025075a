use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use fintrack_core::dashboard::DashboardSummary;

use crate::{auth::Owner, error::ApiResult, main_lib::AppState};

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
) -> ApiResult<Json<DashboardSummary>> {
    let summary = state.dashboard_service.get_summary(&owner).await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard/summary", get(get_summary))
}
