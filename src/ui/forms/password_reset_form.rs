//! Password reset page

use super::field_renderer::draw_field;
use crate::app::App;
use crate::state::Form;
use crate::ui::components::{
    callout_height, render_action_button, render_callout, CalloutKind, BUTTON_HEIGHT,
};
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

const FORM_WIDTH: u16 = 60;
const SUCCESS_MESSAGE: &str =
    "Your password has been changed. You will be redirected to the login page shortly.";

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(flow) = app.reset_flow.as_ref() else {
        return;
    };

    let width = FORM_WIDTH.min(area.width);
    let succeeded = flow.status().is_succeeded();
    let error = flow.error_message();
    let missing_token = flow.token().token().is_none();

    let success_rows = if succeeded {
        callout_height(SUCCESS_MESSAGE, width)
    } else {
        0
    };
    let error_rows = error
        .as_deref()
        .map(|message| callout_height(message, width))
        .unwrap_or(0);
    let hint_rows = u16::from(missing_token);
    let height = 3 + success_rows + 3 + 3 + error_rows + BUTTON_HEIGHT + hint_rows;

    let form_area = centered_rect(width, height, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(success_rows),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(error_rows),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(hint_rows),
        ])
        .split(form_area);

    let heading = Paragraph::new(vec![
        Line::styled(
            "Forgot your password?",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Choose a new password for your account.",
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(heading, chunks[0]);

    if succeeded {
        render_callout(frame, chunks[1], CalloutKind::Success, SUCCESS_MESSAGE);
    }

    let active = flow.form.active_field();
    let editable = !flow.status().is_loading();
    draw_field(frame, chunks[2], &flow.form.password, active == 0, editable);
    draw_field(frame, chunks[3], &flow.form.password_confirm, active == 1, editable);

    if let Some(message) = error.as_deref() {
        render_callout(frame, chunks[4], CalloutKind::Error, message);
    }

    render_action_button(
        frame,
        chunks[5],
        "Change password",
        "Changing password…",
        flow.form.is_button_active(),
        flow.can_submit(),
        flow.status().is_loading(),
    );

    if missing_token {
        frame.render_widget(
            Paragraph::new("This link has no reset token; request a new one if the change fails.")
                .style(Style::default().fg(Color::Yellow)),
            chunks[6],
        );
    }
}
