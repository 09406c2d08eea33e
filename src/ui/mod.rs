//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod login;
mod project;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::ProjectCreate => forms::draw_project_create(frame, main_area, app),
        View::PasswordReset => forms::draw_password_reset(frame, main_area, app),
        View::Login => login::draw(frame, main_area),
        View::ProjectDetail => project::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog overlays everything else
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.error_count());
    }
}
