#![allow(dead_code)]
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use mockall::mock;
use passreset_backend::{
    app,
    config::Config,
    identity::{AccountRecord, IdentityError, IdentityService},
    state::AppState,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const ALLOWED_ORIGIN: &str = "https://reset.example.app";

mock! {
    pub Identity {}

    #[async_trait]
    impl IdentityService for Identity {
        async fn find_users_by_email(&self, email: &str) -> Result<Vec<AccountRecord>, IdentityError>;
        async fn update_password(&self, user_id: &str, new_password: &str) -> Result<(), IdentityError>;
    }
}

pub fn test_config() -> Config {
    Config {
        identity_service_url: Some("http://identity.invalid".into()),
        identity_service_key: Some("service-role".into()),
        allowed_origins: vec![ALLOWED_ORIGIN.into()],
        bind_addr: "127.0.0.1:0".parse().expect("bind addr"),
    }
}

pub fn account(id: &str, email: &str) -> AccountRecord {
    AccountRecord {
        id: id.into(),
        email: Some(email.into()),
    }
}

pub fn app_with(identity: MockIdentity) -> Router {
    app(AppState::new(test_config(), Some(Arc::new(identity))))
}

pub fn reset_request(origin: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/reset-password")
        .header("content-type", "application/json");
    if let Some(origin) = origin {
        builder = builder.header("origin", origin);
    }
    builder.body(body.into()).expect("build request")
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("call app")
}

pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = send(app, request).await;
    let status = response.status();
    let body = response_json(response).await;
    (status, body)
}

pub async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
