use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub enum AppError {
    Unauthorized,
    BadPayload,
    ServerMisconfigured,
    /// The account lookup answered with a non-success status, which is
    /// forwarded to the caller as-is.
    UpstreamLookup {
        status: StatusCode,
        message: String,
    },
    UnknownEmail,
    UpstreamUpdate(String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadPayload | AppError::UpstreamUpdate(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamLookup { status, .. } => *status,
            AppError::UnknownEmail => StatusCode::NOT_FOUND,
            AppError::ServerMisconfigured | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::BadPayload => "BAD_PAYLOAD",
            AppError::ServerMisconfigured => "SERVER_MISCONFIGURED",
            AppError::UpstreamLookup { .. } => "UPSTREAM_LOOKUP_FAILED",
            AppError::UnknownEmail => "UNKNOWN_EMAIL",
            AppError::UpstreamUpdate(_) => "UPSTREAM_UPDATE_FAILED",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::BadPayload => "Bad payload".to_string(),
            AppError::ServerMisconfigured => "Server misconfigured (env missing)".to_string(),
            AppError::UpstreamLookup { message, .. } => format!("get user failed: {}", message),
            AppError::UnknownEmail => "Email inconnu".to_string(),
            AppError::UpstreamUpdate(message) => message.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(err) = &self {
            tracing::error!("Internal server error: {:?}", err);
        }

        let body = Json(ErrorResponse {
            error: self.message(),
            code: self.code().to_string(),
        });

        (self.status_code(), body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|field| field.to_string())
            .collect();
        tracing::debug!(?fields, "reset payload failed validation");
        AppError::BadPayload
    }
}
