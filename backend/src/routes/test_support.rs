//! Router test helpers backed by in-memory stores

use crate::config::AppConfig;
use crate::db;
use crate::repositories::memory::{MemoryTodoRepository, MemoryUserRepository};
use crate::routes::create_router;
use crate::state::AppState;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestRouter {
    pub app: Router,
    pub state: AppState,
}

impl TestRouter {
    pub fn new() -> Self {
        let config = AppConfig::default();
        let pool = db::create_lazy_pool(&config.database).unwrap();
        let state = AppState::with_stores(
            pool,
            config,
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryTodoRepository::new()),
        );
        let app = create_router(state.clone());
        Self { app, state }
    }

    /// Send a request; `body` is JSON, `token` becomes a Bearer header
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", path, Some(body), None).await
    }

    /// Sign up and sign in, returning (accessToken, refreshToken)
    pub async fn signed_in(&self, id: &str, password: &str) -> (String, String) {
        let creds = serde_json::json!({ "id": id, "password": password });
        let (status, _) = self.post("/signup", creds.clone()).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self.post("/signin", creds).await;
        assert_eq!(status, StatusCode::OK);
        (
            body["accessToken"].as_str().unwrap().to_string(),
            body["refreshToken"].as_str().unwrap().to_string(),
        )
    }
}
