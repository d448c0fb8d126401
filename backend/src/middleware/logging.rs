use axum::{
    body::{to_bytes, Body, Bytes, HttpBody},
    http::{header::CONTENT_LENGTH, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use super::request_id::RequestId;

const MAX_BUFFERED_BODY_BYTES: usize = 64 * 1024;
const MAX_LOGGED_BODY_BYTES: usize = 1024;

struct ErrorEvent<'a> {
    status: u16,
    method: &'a str,
    uri: &'a str,
    request_id: &'a str,
    latency_ms: u64,
}

/// Logs every 4xx/5xx answer with its error body. Only response bodies are
/// buffered; request bodies carry passwords and are never read here.
pub async fn log_error_responses(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let uri = req.uri().path().to_string();
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let start = Instant::now();

    let response = next.run(req).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let event = ErrorEvent {
        status: status.as_u16(),
        method: &method,
        uri: &uri,
        request_id: &request_id,
        latency_ms: start.elapsed().as_millis() as u64,
    };

    let (mut parts, body) = response.into_parts();
    // Bodies that may exceed the buffer are forwarded untouched.
    let fits = body
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_BUFFERED_BODY_BYTES as u64);
    if !fits {
        log_error_event(&event, "<body not buffered>");
        return Response::from_parts(parts, body);
    }

    match to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
        Ok(bytes) => {
            log_error_event(&event, &preview(&bytes));
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            parts.headers.remove(CONTENT_LENGTH);
            log_error_event(&event, &format!("<unreadable body: {}>", err));
            Response::from_parts(parts, Body::empty())
        }
    }
}

fn preview(bytes: &Bytes) -> String {
    if bytes.len() > MAX_LOGGED_BODY_BYTES {
        format!(
            "{}... (truncated, {} bytes total)",
            String::from_utf8_lossy(&bytes[..MAX_LOGGED_BODY_BYTES]),
            bytes.len()
        )
    } else {
        String::from_utf8_lossy(bytes).to_string()
    }
}

fn log_error_event(event: &ErrorEvent<'_>, body: &str) {
    if event.status >= 500 {
        tracing::error!(
            status = event.status,
            method = event.method,
            uri = event.uri,
            request_id = event.request_id,
            latency_ms = event.latency_ms,
            body,
            "Request completed with error status"
        );
    } else {
        tracing::warn!(
            status = event.status,
            method = event.method,
            uri = event.uri,
            request_id = event.request_id,
            latency_ms = event.latency_ms,
            body,
            "Request completed with error status"
        );
    }
}
