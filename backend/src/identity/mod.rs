//! Seam between the reset handler and the external identity service.
//!
//! The handler only talks to [`IdentityService`]; [`GoTrueAdminClient`] is the
//! production implementation over the GoTrue-style admin REST API.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod gotrue;

pub use gotrue::GoTrueAdminClient;

/// Account as returned by the identity service. Read-only from our side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity service answered {status}")]
    Status { status: StatusCode, body: String },
    #[error("identity service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("identity service returned an unreadable body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid identity service url: {0}")]
    InvalidBaseUrl(String),
}

impl IdentityError {
    /// Human readable message for a non-success answer: the first message-like
    /// field of a JSON error body, else the raw body, else the status reason.
    pub fn upstream_message(&self) -> String {
        match self {
            IdentityError::Status { status, body } => extract_message(body)
                .or_else(|| {
                    let trimmed = body.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("upstream error")
                        .to_string()
                }),
            other => other.to_string(),
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn find_users_by_email(&self, email: &str) -> Result<Vec<AccountRecord>, IdentityError>;

    async fn update_password(&self, user_id: &str, new_password: &str)
        -> Result<(), IdentityError>;
}

/// Picks the candidate whose email matches case-insensitively, falling back
/// to the first one returned.
pub fn select_account<'a>(accounts: &'a [AccountRecord], email: &str) -> Option<&'a AccountRecord> {
    let wanted = email.to_lowercase();
    accounts
        .iter()
        .find(|account| {
            account
                .email
                .as_deref()
                .is_some_and(|candidate| candidate.to_lowercase() == wanted)
        })
        .or_else(|| accounts.first())
}
