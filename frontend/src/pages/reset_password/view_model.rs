use super::repository::ResetPasswordRepository;
use crate::{
    api::{ApiClient, ApiError, ResetPasswordRequest, ResetPasswordResponse},
    bridge,
};
use leptos::*;
use std::rc::Rc;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MISSING_FIELDS: &str = "Remplissez tous les champs.";
pub const PASSWORD_TOO_SHORT: &str = "Mot de passe trop court (min. 6).";
pub const PASSWORD_MISMATCH: &str = "Les mots de passe ne correspondent pas.";
pub const RESET_SUCCEEDED: &str = "Mot de passe changé. Retournez dans l'app pour vous connecter.";

#[derive(Debug, Clone, PartialEq)]
pub struct ResetInput {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

#[derive(Clone, Copy)]
pub struct ResetPasswordViewModel {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
    pub submit_action: Action<ResetInput, Result<ResetPasswordResponse, ApiError>>,
}

impl ResetPasswordViewModel {
    pub fn submit(&self) {
        self.error.set(None);
        self.success.set(None);
        self.submit_action.dispatch(ResetInput {
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            confirm: self.confirm.get_untracked(),
        });
    }
}

pub fn use_reset_password_view_model(initial_email: String) -> ResetPasswordViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = ResetPasswordRepository::new_with_client(Rc::new(api));

    let email = create_rw_signal(initial_email);
    let password = create_rw_signal(String::new());
    let confirm = create_rw_signal(String::new());
    let error = create_rw_signal(None);
    let success = create_rw_signal(None);

    // The outcome is applied inside the action so it lands in the form on
    // every target, including server rendering where effects never run.
    let submit_action = create_action(move |input: &ResetInput| {
        let repo = repository.clone();
        let input = input.clone();
        async move {
            let result = submit_reset(&repo, &input).await;
            match &result {
                Ok(resp) => {
                    success.set(Some(RESET_SUCCEEDED.to_string()));
                    error.set(None);
                    password.set(String::new());
                    confirm.set(String::new());
                    bridge::notify_reset_completed(resp.user_id.as_deref());
                }
                Err(err) => {
                    log::warn!("Password reset failed: {} ({})", err, err.code);
                    error.set(Some(err.to_string()));
                    success.set(None);
                }
            }
            result
        }
    });

    ResetPasswordViewModel {
        email,
        password,
        confirm,
        error,
        success,
        submit_action,
    }
}

/// Validates locally and only then calls the endpoint.
pub async fn submit_reset(
    repo: &ResetPasswordRepository,
    input: &ResetInput,
) -> Result<ResetPasswordResponse, ApiError> {
    let request = validate_reset_input(input)?;
    repo.reset_password(request).await
}

pub fn validate_reset_input(input: &ResetInput) -> Result<ResetPasswordRequest, ApiError> {
    if input.email.is_empty() || input.password.is_empty() || input.confirm.is_empty() {
        return Err(ApiError::validation(MISSING_FIELDS));
    }
    // Counts Unicode scalar values, not UTF-16 units.
    if input.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::validation(PASSWORD_TOO_SHORT));
    }
    if input.password != input.confirm {
        return Err(ApiError::validation(PASSWORD_MISMATCH));
    }
    Ok(ResetPasswordRequest {
        email: input.email.clone(),
        new_password: input.password.clone(),
    })
}
