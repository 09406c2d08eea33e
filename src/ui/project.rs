//! Created project summary

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Project ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(project) = &app.state.project else {
        frame.render_widget(
            Paragraph::new("No project selected. Press n to create one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            project.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("ID:       ", label), Span::raw(project.id.to_string())]),
        Line::from(vec![Span::styled("Path:     ", label), Span::raw(project.path())]),
    ];

    let team = app
        .state
        .active_team
        .as_ref()
        .filter(|team| team.id == project.team_id)
        .map(|team| team.name.clone())
        .unwrap_or_else(|| format!("#{}", project.team_id));
    lines.push(Line::from(vec![Span::styled("Team:     ", label), Span::raw(team)]));

    if let Some(brew) = &project.brew_name {
        lines.push(Line::from(vec![
            Span::styled("Brew:     ", label),
            Span::raw(brew.clone()),
        ]));
    }
    if let Some(created_at) = project.created_at {
        lines.push(Line::from(vec![
            Span::styled("Created:  ", label),
            Span::raw(created_at.format("%Y-%m-%d %H:%M UTC").to_string()),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
