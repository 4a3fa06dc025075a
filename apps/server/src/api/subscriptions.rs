use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::{
    auth::Owner,
    error::ApiResult,
    extract::ApiJson,
    main_lib::AppState,
    models::{SubscriptionDeleted, SubscriptionPayload, SubscriptionResponse},
};

async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
) -> ApiResult<Json<Vec<SubscriptionResponse>>> {
    let subscriptions = state.subscription_service.list_subscriptions(&owner)?;
    Ok(Json(
        subscriptions
            .into_iter()
            .map(SubscriptionResponse::from)
            .collect(),
    ))
}

async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
    ApiJson(payload): ApiJson<SubscriptionPayload>,
) -> ApiResult<(StatusCode, Json<SubscriptionResponse>)> {
    let created = state
        .subscription_service
        .create_subscription(&owner, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn update_subscription(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
    ApiJson(payload): ApiJson<SubscriptionPayload>,
) -> ApiResult<Json<SubscriptionResponse>> {
    let updated = state
        .subscription_service
        .update_subscription(&owner, &id, payload.into())
        .await?;
    Ok(Json(updated.into()))
}

async fn delete_subscription(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
) -> ApiResult<Json<SubscriptionDeleted>> {
    state
        .subscription_service
        .delete_subscription(&owner, &id)
        .await?;
    Ok(Json(SubscriptionDeleted {
        success: true,
        subscription_id: id,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/subscriptions",
            get(list_subscriptions).post(create_subscription),
        )
        .route(
            "/subscriptions/{id}",
            put(update_subscription).delete(delete_subscription),
        )
}
