//! Models for the self-service password reset.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppError, validation::rules};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
/// Payload posted by the reset form.
pub struct ResetPasswordPayload {
    /// Email address of the account to reset.
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    /// New password, at least six characters.
    #[serde(rename = "newPassword", alias = "new_password")]
    #[validate(required, custom(function = "rules::validate_password_length"))]
    pub new_password: Option<String>,
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetRequest {
    pub email: String,
    pub new_password: String,
}

impl TryFrom<ResetPasswordPayload> for ResetRequest {
    type Error = AppError;

    fn try_from(payload: ResetPasswordPayload) -> Result<Self, Self::Error> {
        payload.validate()?;
        match (payload.email, payload.new_password) {
            (Some(email), Some(new_password)) => Ok(ResetRequest {
                email,
                new_password,
            }),
            _ => Err(AppError::BadPayload),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// Body returned once the identity service accepted the new password.
pub struct ResetPasswordResponse {
    pub ok: bool,
    /// Identifier of the account whose password changed.
    pub user_id: String,
}

impl ResetPasswordResponse {
    pub fn completed(user_id: impl Into<String>) -> Self {
        Self {
            ok: true,
            user_id: user_id.into(),
        }
    }
}
