//! Dashboard API module

mod client;
mod traits;

pub use client::{ApiClient, DEFAULT_API_HOST};
pub use traits::{ActionDispatcher, NewProject, PasswordChange, TemplatePicker};

#[cfg(test)]
pub use traits::{MockActionDispatcher, MockTemplatePicker};
