//! Validation rules for reset payloads.
//!
//! The minimum password length is the only policy enforced here; password
//! strength beyond that is the identity service's concern.

pub mod rules;

pub use validator::Validate;
