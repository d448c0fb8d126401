pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod state;
pub mod validation;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::Config, state::AppState};

/// Builds the service router with its shared layers.
pub fn app(state: AppState) -> Router {
    // Route layers wrap POST only. OPTIONS is registered after them so the
    // preflight handler is never rejected by the origin guard.
    let reset_route = post(handlers::reset_password::reset_password)
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_allowed_origin,
        ))
        .route_layer(cors_layer(&state.config))
        .options(handlers::reset_password::preflight);

    Router::new()
        .route("/api/reset-password", reset_route)
        .route("/health", get(handlers::health::health))
        .merge(SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", docs::ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_id))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::log_error_responses))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                )),
        )
        .with_state(state)
}

/// Permissive when no allow-list is configured, otherwise mirrors only the
/// origins the guard would accept.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let allow_origin = if config.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let allowed = config.allowed_origins.clone();
        AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin.to_str().is_ok_and(|origin| {
                allowed
                    .iter()
                    .any(|prefix| middleware::origin_matches(prefix, origin))
            })
        })
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(
            handlers::reset_password::PREFLIGHT_MAX_AGE_SECS,
        ))
}
