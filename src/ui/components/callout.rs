//! Inline callouts for form feedback

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
    Success,
    Error,
}

impl CalloutKind {
    fn color(self) -> Color {
        match self {
            CalloutKind::Success => Color::Green,
            CalloutKind::Error => Color::Red,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            CalloutKind::Success => "✓",
            CalloutKind::Error => "✗",
        }
    }
}

/// Bordered message box in the callout color
pub fn render_callout(frame: &mut Frame, area: Rect, kind: CalloutKind, message: &str) {
    let color = kind.color();
    let content = Line::from(vec![
        Span::styled(format!("{} ", kind.icon()), Style::default().fg(color)),
        Span::raw(message.to_string()),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

/// Rows needed to show `message` inside a callout of the given width
pub fn callout_height(message: &str, width: u16) -> u16 {
    // borders + icon prefix
    let inner = width.saturating_sub(4).max(1) as usize;
    let lines = message.chars().count().div_ceil(inner).max(1);
    lines as u16 + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callout_height_single_line() {
        assert_eq!(callout_height("Saved", 40), 3);
    }

    #[test]
    fn test_callout_height_wraps() {
        let message = "x".repeat(50);
        assert_eq!(callout_height(&message, 24), 5);
    }

    #[test]
    fn test_callout_height_empty_message() {
        assert_eq!(callout_height("", 10), 3);
    }
}
