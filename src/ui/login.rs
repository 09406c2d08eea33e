//! Login landing page shown after a password change

use super::layout::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::styled("Login", Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("Sign in to the dashboard with your new password."),
        Line::from(""),
        Line::styled("Press Enter to exit", Style::default().fg(Color::DarkGray)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        centered_rect(56, 7, area),
    );
}
