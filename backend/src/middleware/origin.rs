use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Rejects callers whose `Origin` and `Referer` both fall outside the
/// configured allow-list. Runs before the body is read so no outbound call
/// happens for a rejected caller.
pub async fn require_allowed_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !caller_allowed(&state.config.allowed_origins, request.headers()) {
        tracing::warn!(
            origin = header_str(request.headers(), header::ORIGIN),
            referer = header_str(request.headers(), header::REFERER),
            "Rejected caller outside origin allow-list"
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// An empty allow-list admits every caller.
pub fn caller_allowed(allowed: &[String], headers: &HeaderMap) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let origin = header_str(headers, header::ORIGIN);
    let referer = header_str(headers, header::REFERER);
    allowed
        .iter()
        .any(|prefix| origin_matches(prefix, origin) || origin_matches(prefix, referer))
}

/// Prefix match that stops at the host boundary: a bare origin such as
/// `https://reset.example.app` never matches `https://reset.example.app.evil.com`.
pub fn origin_matches(prefix: &str, candidate: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    let Some(rest) = candidate.strip_prefix(prefix) else {
        return false;
    };
    rest.is_empty() || !is_bare_origin(prefix) || rest.starts_with(['/', '?', '#'])
}

fn is_bare_origin(prefix: &str) -> bool {
    let authority = prefix.split_once("://").map_or(prefix, |(_, rest)| rest);
    !authority.contains('/')
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> &str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
