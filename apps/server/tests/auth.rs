mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn protected_routes_require_a_valid_bearer_token() {
    let app = common::spawn_jwt_app().await;

    for uri in ["/api/dashboard/summary", "/api/expenses", "/api/subscriptions", "/api/budgets"] {
        let response = app.send(Method::GET, uri, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(response.body["code"], 401);
    }

    let forged = app
        .send(Method::GET, "/api/expenses", None, Some("not.a.token"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let ok = app
        .send(
            Method::GET,
            "/api/expenses",
            None,
            Some(&common::token_for("alice")),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
}

#[tokio::test]
async fn rejected_requests_never_reach_the_store() {
    let app = common::spawn_jwt_app().await;
    let alice = common::token_for("alice");

    let anonymous = app
        .send(
            Method::POST,
            "/api/expenses",
            Some(json!({"title": "Lunch", "category": "Food", "amount_cents": 1200, "date": "2024-03-05"})),
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let listed = app
        .send(Method::GET, "/api/expenses", None, Some(&alice))
        .await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn expenses_of_another_owner_are_invisible() {
    let app = common::spawn_jwt_app().await;
    let alice = common::token_for("alice");
    let bob = common::token_for("bob");

    let created = app
        .send(
            Method::POST,
            "/api/expenses",
            Some(json!({"title": "Lunch", "category": "Food", "amount_cents": 1200, "date": "2024-03-05"})),
            Some(&alice),
        )
        .await;
    let uri = format!("/api/expenses/{}", created.body["id"].as_str().unwrap());

    for method in [Method::GET, Method::DELETE] {
        let response = app.send(method, &uri, None, Some(&bob)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
    let patch = app
        .send(Method::PATCH, &uri, Some(json!({"title": "Mine"})), Some(&bob))
        .await;
    assert_eq!(patch.status, StatusCode::NOT_FOUND);

    let still_there = app.send(Method::GET, &uri, None, Some(&alice)).await;
    assert_eq!(still_there.body["title"], "Lunch");
}
