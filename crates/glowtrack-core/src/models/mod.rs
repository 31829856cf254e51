//! Domain models for the GlowTrack clients.

mod analysis;
mod patient;
mod treatment;

pub use analysis::*;
pub use patient::*;
pub use treatment::*;

use thiserror::Error;
use validator::ValidateEmail;

/// Form validation errors, raised before anything is sent to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    Required(String),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Reports the first failing field, by field name.
impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let Some((field, failures)) = fields.into_iter().next() else {
            return ValidationError::Invalid {
                field: "form".to_string(),
                reason: errors.to_string(),
            };
        };
        let field = field.to_string();

        match failures.first() {
            Some(failure) if failure.code == "required" => ValidationError::Required(field),
            Some(failure) => ValidationError::Invalid {
                field,
                reason: failure
                    .message
                    .as_ref()
                    .map_or_else(|| failure.code.to_string(), |m| m.to_string()),
            },
            None => ValidationError::Invalid {
                field,
                reason: "invalid value".to_string(),
            },
        }
    }
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("required"));
    }
    Ok(())
}

/// The intake form submits an empty string when no email is given.
fn email_or_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("email");
        error.message = Some("Invalid email format".into());
        Err(error)
    }
}
