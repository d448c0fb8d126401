use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{api::types::*, config};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(config::normalize_base_url(&base_url.into())),
        }
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<ResetPasswordResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/reset-password", base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_success() {
            serde_json::from_str(&body)
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(error_from_response(status, &body))
        }
    }
}

/// Uses the endpoint's `error` text when present, otherwise a message naming
/// the status.
fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    let details = serde_json::from_str::<Value>(body).ok();
    let field = |name: &str| {
        details
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    };

    ApiError {
        error: field("error").unwrap_or_else(|| {
            format!("Erreur {} lors de la réinitialisation.", status.as_u16())
        }),
        code: field("code").unwrap_or_else(|| "HTTP_ERROR".to_string()),
        details,
    }
}
