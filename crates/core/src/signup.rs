//! Sign-up request validation.
//!
//! Field rules match the portal's sign-up form: a well-formed email, a
//! password of at least [`MIN_PASSWORD_LENGTH`] characters, and non-blank
//! company and contact names.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Fields are reported in this order when several are invalid.
const FIELD_ORDER: &[&str] = &["contact_name", "company_name", "email", "password"];

/// Request body for creating a new client identity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(custom(function = not_blank, message = "Company name is required"))]
    pub company_name: String,
    #[validate(custom(function = not_blank, message = "Your name is required"))]
    pub contact_name: String,
}

impl SignUpRequest {
    /// Copy with surrounding whitespace removed from the email and names.
    /// The password is kept as typed.
    pub fn trimmed(&self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            company_name: self.company_name.trim().to_string(),
            contact_name: self.contact_name.trim().to_string(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Validate a sign-up request, returning the first human-readable problem.
pub fn validate_signup(request: &SignUpRequest) -> Result<(), String> {
    request.validate().map_err(|errors| {
        let fields = errors.field_errors();
        for name in FIELD_ORDER {
            if let Some(first) = fields.get(*name).and_then(|errs| errs.first()) {
                return first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {name}"));
            }
        }
        "Invalid sign-up details".to_string()
    })
}
