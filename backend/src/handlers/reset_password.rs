use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::{
    error::AppError,
    identity::{select_account, IdentityError},
    middleware::origin_matches,
    models::password_reset::{ResetPasswordPayload, ResetPasswordResponse, ResetRequest},
    state::AppState,
};

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "content-type";
pub const PREFLIGHT_MAX_AGE_SECS: u64 = 24 * 60 * 60;

/// Overwrites the password of the account registered under `email`.
///
/// The caller has already passed the origin allow-list by the time this runs.
/// Validation comes before the configuration check, and the lookup and the
/// update are issued sequentially; the first failure answers.
pub async fn reset_password(
    State(state): State<AppState>,
    payload: Result<Json<ResetPasswordPayload>, JsonRejection>,
) -> Result<Json<ResetPasswordResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected reset payload");
        AppError::BadPayload
    })?;
    let request = ResetRequest::try_from(payload)?;

    let identity = state.identity()?;

    let accounts = identity
        .find_users_by_email(&request.email)
        .await
        .map_err(lookup_error)?;
    let account = select_account(&accounts, &request.email).ok_or(AppError::UnknownEmail)?;

    identity
        .update_password(&account.id, &request.new_password)
        .await
        .map_err(update_error)?;

    tracing::info!(user_id = %account.id, "Password reset completed");
    Ok(Json(ResetPasswordResponse::completed(account.id.clone())))
}

/// CORS preflight. Allows any origin when the allow-list is empty, otherwise
/// mirrors the request origin only when it is listed.
pub async fn preflight(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut response = Json(Value::Null).into_response();
    let out = response.headers_mut();
    out.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    out.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    out.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from(PREFLIGHT_MAX_AGE_SECS),
    );
    if let Some(origin) = preflight_origin(&state.config.allowed_origins, &headers) {
        out.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }
    out.insert(header::VARY, HeaderValue::from_static("origin"));
    response
}

fn preflight_origin(allowed: &[String], headers: &HeaderMap) -> Option<HeaderValue> {
    if allowed.is_empty() {
        return Some(HeaderValue::from_static("*"));
    }
    let origin = headers.get(header::ORIGIN)?;
    let candidate = origin.to_str().ok()?;
    allowed
        .iter()
        .any(|prefix| origin_matches(prefix, candidate))
        .then(|| origin.clone())
}

fn lookup_error(err: IdentityError) -> AppError {
    match err {
        IdentityError::Status { status, body } => {
            tracing::warn!(%status, "Identity lookup rejected");
            AppError::UpstreamLookup {
                status,
                message: body,
            }
        }
        other => AppError::Internal(anyhow::Error::new(other).context("identity lookup failed")),
    }
}

fn update_error(err: IdentityError) -> AppError {
    match err {
        IdentityError::Status { .. } => {
            let message = err.upstream_message();
            tracing::warn!(message = %message, "Identity password update rejected");
            AppError::UpstreamUpdate(message)
        }
        other => {
            AppError::Internal(anyhow::Error::new(other).context("identity password update failed"))
        }
    }
}
