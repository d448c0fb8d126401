//! Rules shared by request payloads.

use validator::ValidationError;

/// Shortest password the reset endpoint accepts, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validates that a new password has at least [`MIN_PASSWORD_LENGTH`]
/// characters.
pub fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    // Counts Unicode scalar values, not UTF-16 units.
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("password_too_short"));
    }
    Ok(())
}
