#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use fintrack_ai::GeminiConfig;
use fintrack_server::{
    api::app_router,
    auth::JwtAuthenticator,
    build_state,
    config::{AuthConfig, Config, LogFormat},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const SECRET: &[u8; 32] = b"fintrack-test-secret-012345678!!";

pub struct TestApp {
    // Keeps the database directory alive while the router is in use.
    _dir: TempDir,
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

fn test_config(dir: &TempDir, auth: AuthConfig) -> Config {
    Config {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        db_path: dir
            .path()
            .join("fintrack.db")
            .to_string_lossy()
            .to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        auth,
        ai: GeminiConfig::default(),
        log_format: LogFormat::Text,
    }
}

async fn spawn_with(auth: AuthConfig) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir, auth);
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        _dir: dir,
    }
}

/// An app where every request belongs to `owner`.
pub async fn spawn_dev_app(owner: &str) -> TestApp {
    spawn_with(AuthConfig::DevOwner(owner.to_string())).await
}

/// An app that requires bearer tokens signed with [`SECRET`].
pub async fn spawn_jwt_app() -> TestApp {
    spawn_with(AuthConfig::Jwt {
        secret: SECRET.to_vec(),
    })
    .await
}

pub fn token_for(owner: &str) -> String {
    JwtAuthenticator::new(SECRET)
        .issue_token(owner, Duration::from_secs(300))
        .unwrap()
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body), None).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, None).await
    }
}
