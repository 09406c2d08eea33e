//! Local validation rules run before any request is dispatched

use super::form_state::{PasswordResetForm, ProjectCreateForm};
use crate::error::{ValidationError, MIN_PASSWORD_LENGTH};

/// A form that can check its own fields
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Length is checked before the confirmation match.
pub fn validate_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if password != confirmation {
        return Err(ValidationError::Mismatch);
    }
    Ok(())
}

pub fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(())
}

impl Validate for PasswordResetForm {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_password(self.password.as_text(), self.password_confirm.as_text())
    }
}

impl Validate for ProjectCreateForm {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_project_name(self.name.as_text())
    }
}
