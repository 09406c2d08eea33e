//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a single-line input. Secret fields are masked by the field itself.
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool, is_enabled: bool) {
    let color = match (is_enabled, is_active) {
        (false, _) => Color::DarkGray,
        (true, true) => Color::Cyan,
        (true, false) => Color::Gray,
    };

    let value = field.display_value();
    let mut spans = vec![Span::styled(value, Style::default().fg(color))];
    if is_active && is_enabled {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
