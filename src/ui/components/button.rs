//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .alignment(Alignment::Center)
        .style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a primary action button. While `is_loading` the label is replaced
/// by `loading_label` and the button is drawn disabled.
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    loading_label: &str,
    is_selected: bool,
    is_enabled: bool,
    is_loading: bool,
) {
    if is_loading {
        render_button(frame, area, loading_label, is_selected, false);
        return;
    }
    if !is_enabled {
        render_button(frame, area, label, is_selected, false);
        return;
    }

    let accent = if is_selected { Color::Green } else { Color::Gray };
    let paragraph = Paragraph::new(format!(" {label} "))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD),
        );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(paragraph.block(block), area);
}
