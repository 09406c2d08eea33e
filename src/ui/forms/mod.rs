//! Form views

mod field_renderer;
mod password_reset_form;
mod project_form;

pub use password_reset_form::draw as draw_password_reset;
pub use project_form::draw as draw_project_create;
