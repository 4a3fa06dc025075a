use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use fintrack_core::budgets::BudgetInput;

use crate::{
    auth::Owner,
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    main_lib::AppState,
    models::{BudgetMonthQuery, BudgetResponse},
};

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
    ApiQuery(query): ApiQuery<BudgetMonthQuery>,
) -> ApiResult<Json<Vec<BudgetResponse>>> {
    let budgets = state.budget_service.list_budgets(&owner, query.month)?;
    Ok(Json(budgets.into_iter().map(BudgetResponse::from).collect()))
}

async fn set_budget(
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
    ApiJson(input): ApiJson<BudgetInput>,
) -> ApiResult<Json<BudgetResponse>> {
    let budget = state.budget_service.set_budget(&owner, input).await?;
    Ok(Json(budget.into()))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(&owner, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).put(set_budget))
        .route("/budgets/{id}", delete(delete_budget))
}
