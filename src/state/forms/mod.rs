//! Form domain layer
//!
//! Type-safe field values, the two form structs and their validation rules.

mod field;
mod form_state;
mod validation;

pub use field::FormField;
pub use form_state::{Form, PasswordResetForm, ProjectCreateForm, ProjectFormRow};
pub use validation::Validate;
