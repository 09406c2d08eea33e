//! Project creation modal

use super::field_renderer::draw_field;
use crate::app::App;
use crate::flows::{ActiveMenu, ProjectCreationFlow};
use crate::state::ProjectFormRow;
use crate::ui::components::{
    callout_height, render_action_button, render_button, render_callout, CalloutKind,
    BUTTON_HEIGHT,
};
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

const EMPTY_MODAL_WIDTH: u16 = 50;
const TEMPLATE_MODAL_WIDTH: u16 = 90;
const TEMPLATE_LIST_HEIGHT: u16 = 10;

/// Draw the create project modal over the content area
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(flow) = app.project_flow.as_ref() else {
        return;
    };

    let template_mode = flow.active_menu() == ActiveMenu::Template;
    let width = if template_mode {
        TEMPLATE_MODAL_WIDTH
    } else {
        EMPTY_MODAL_WIDTH
    }
    .min(area.width);

    let error = flow.error_message();
    let error_rows = error
        .as_deref()
        .map(|message| callout_height(message, width.saturating_sub(2)))
        .unwrap_or(0);
    let mode_rows = if flow.form.shows_mode() { BUTTON_HEIGHT } else { 0 };
    let list_rows = if template_mode { TEMPLATE_LIST_HEIGHT } else { 0 };
    let height = 2 + 3 + error_rows + mode_rows + list_rows + BUTTON_HEIGHT;

    let modal = centered_rect(width, height, area);
    frame.render_widget(Clear, modal);
    let block = Block::default()
        .title(format!(" New project in {} ", flow.team().name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(error_rows),
            Constraint::Length(mode_rows),
            Constraint::Min(list_rows),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .split(inner);

    let row = flow.form.active_row();
    draw_name(frame, chunks[0], flow, row == ProjectFormRow::Name);
    if let Some(message) = error.as_deref() {
        render_callout(frame, chunks[1], CalloutKind::Error, message);
    }
    if flow.form.shows_mode() {
        draw_mode_row(frame, chunks[2], flow, row == ProjectFormRow::Mode);
    }
    if template_mode {
        draw_templates(frame, chunks[3], flow, row == ProjectFormRow::Actions);
    }
    draw_submit(frame, chunks[4], flow, row == ProjectFormRow::Actions);
}

fn draw_name(frame: &mut Frame, area: Rect, flow: &ProjectCreationFlow, is_active: bool) {
    // The name is cleared once the template path has created the project
    if let Some(project) = flow.created() {
        let created = Paragraph::new(Line::from(vec![
            Span::styled("✓ ", Style::default().fg(Color::Green)),
            Span::raw(project.name.clone()),
        ]))
        .block(
            Block::default()
                .title(" Project ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(created, area);
        return;
    }
    draw_field(frame, area, &flow.form.name, is_active, !flow.is_busy());
}

fn draw_mode_row(frame: &mut Frame, area: Rect, flow: &ProjectCreationFlow, is_active: bool) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let enabled = flow.can_choose_menu();
    for (menu, half) in [ActiveMenu::Empty, ActiveMenu::Template].into_iter().zip(halves.iter()) {
        let chosen = flow.active_menu() == menu;
        let marker = if chosen { "●" } else { "○" };
        render_button(
            frame,
            *half,
            &format!("{marker} {}", menu.label()),
            is_active && chosen,
            enabled,
        );
    }
}

fn draw_templates(frame: &mut Frame, area: Rect, flow: &ProjectCreationFlow, is_active: bool) {
    let border = if is_active { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(" Templates ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let templates = flow.templates();
    if templates.loading || templates.data.is_empty() {
        let text = if templates.loading {
            "Loading templates…"
        } else {
            "No templates available for this team"
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = templates
        .data
        .iter()
        .map(|template| {
            let mut spans = vec![Span::styled(
                template.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if let Some(description) = &template.description {
                spans.push(Span::styled(
                    format!("  {description}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Cyan))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(flow.selected_template_index()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_submit(frame: &mut Frame, area: Rect, flow: &ProjectCreationFlow, is_active: bool) {
    match flow.active_menu() {
        ActiveMenu::Empty => render_action_button(
            frame,
            area,
            "Create project",
            "Creating…",
            is_active,
            flow.can_submit(),
            flow.status().is_loading(),
        ),
        ActiveMenu::Template => {
            let finished = flow.template_status().is_succeeded();
            let loading_label = if finished {
                "Opening project…"
            } else if flow.template_status().is_loading() {
                "Applying template…"
            } else {
                "Creating…"
            };
            let ready = flow.created().is_some() || flow.can_submit();
            render_action_button(
                frame,
                area,
                "Create from template",
                loading_label,
                is_active,
                ready && flow.selected_template().is_some(),
                flow.is_busy() || finished,
            );
        }
    }
}
