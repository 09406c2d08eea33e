//! Reusable UI components

mod button;
mod callout;
mod dialog;

pub use button::{render_action_button, render_button, BUTTON_HEIGHT};
pub use callout::{callout_height, render_callout, CalloutKind};
pub use dialog::render_error_dialog;
