use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use fintrack_core::expenses::{Expense, ExpenseCursor, ExpenseInput, ExpenseListQuery};

use crate::{
    auth::Owner,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    main_lib::AppState,
};

/// Response header carrying the token for the next page of a full listing.
pub const NEXT_CURSOR_HEADER: &str = "x-next-cursor";

fn encode_cursor(cursor: &ExpenseCursor) -> String {
    URL_SAFE_NO_PAD.encode(cursor.to_string())
}

fn decode_cursor(token: &str) -> ApiResult<String> {
    let malformed = || ApiError::BadRequest("cursor: malformed cursor".to_string());
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|_| malformed())?;
    String::from_utf8(bytes).map_err(|_| malformed())
}

async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
    ApiQuery(mut query): ApiQuery<ExpenseListQuery>,
) -> ApiResult<Response> {
    query.cursor = query
        .cursor
        .filter(|c| !c.trim().is_empty())
        .map(|c| decode_cursor(&c))
        .transpose()?;

    let page = state.expense_service.list_expenses(&owner, query)?;
    let mut response = Json(page.items).into_response();
    if let Some(cursor) = page.next_cursor {
        let token = HeaderValue::from_str(&encode_cursor(&cursor))
            .map_err(|e| ApiError::Internal(format!("Unencodable cursor: {e}")))?;
        response.headers_mut().insert(NEXT_CURSOR_HEADER, token);
    }
    Ok(response)
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
    ApiJson(input): ApiJson<ExpenseInput>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let created = state.expense_service.create_expense(&owner, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
) -> ApiResult<Json<Expense>> {
    let expense = state.expense_service.get_expense(&owner, &id)?;
    Ok(Json(expense))
}

async fn update_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
    ApiJson(input): ApiJson<ExpenseInput>,
) -> ApiResult<Json<Expense>> {
    let updated = state
        .expense_service
        .update_expense(&owner, &id, input)
        .await?;
    Ok(Json(updated))
}

async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
) -> ApiResult<StatusCode> {
    state.expense_service.delete_expense(&owner, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{id}",
            get(get_expense)
                .patch(update_expense)
                .delete(delete_expense),
        )
}
