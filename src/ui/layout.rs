//! Layout helpers and the status bar

use crate::app::App;
use crate::flows::ActiveMenu;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SAVE_HINT: &str = "^S:submit";

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// A rect of at most `width` x `height` centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    let team = match &app.state.active_team {
        Some(team) => Span::styled(
            format!(" ● {} ", team.name),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled(" ○ no team ", Style::default().fg(Color::Red)),
    };
    spans.push(team);
    spans.push(Span::styled(
        format!("{}  ", app.state.current_view.title()),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::styled(
        view_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let width = quit_hint.len() as u16;
    if area.width > width {
        let quit_area = Rect {
            x: area.x + area.width - width,
            width,
            ..area
        };
        let quit_widget =
            Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
        frame.render_widget(quit_widget, quit_area);
    }
}

/// Keyboard hints for the current view
fn view_hints(app: &App) -> String {
    match app.state.current_view {
        View::ProjectCreate => {
            let template_mode = app
                .project_flow
                .as_ref()
                .is_some_and(|flow| flow.active_menu() == ActiveMenu::Template);
            if template_mode {
                format!("Tab:next  ←/→:mode  j/k:template  Enter:create  {SAVE_HINT}  Esc:close")
            } else {
                format!("Tab:next  Enter:create  {SAVE_HINT}  Esc:close")
            }
        }
        View::PasswordReset => format!("Tab:next  Enter:change password  {SAVE_HINT}  Esc:quit"),
        View::Login => "Enter:quit".to_string(),
        View::ProjectDetail => "n:new project  q:quit".to_string(),
    }
}
