use axum::{http::header, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    pub version: &'static str,
}

pub async fn health() -> impl IntoResponse {
    let health = Health {
        version: env!("CARGO_PKG_VERSION"),
    };

    ([(header::CACHE_CONTROL, "no-cache")], Json(health))
}
