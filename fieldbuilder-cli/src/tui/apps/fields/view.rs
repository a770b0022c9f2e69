//! Base dashboard view: header, the field card list, and the status footer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::api::models::Field;
use crate::tui::resource::Resource;
use crate::tui::status::StatusLevel;
use crate::tui::theme::Theme;

use super::app::FieldsApp;
use super::state::State;
use crate::tui::app::App;

pub fn draw(state: &mut State, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let banner_height = if state.partial_errors.is_empty() { 0 } else { 1 };
    let [header, banner, content, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(banner_height),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(area);

    draw_header(state, frame, header, theme);
    if banner_height > 0 {
        draw_banner(state, frame, banner, theme);
    }
    draw_content(state, frame, content, theme);
    draw_footer(state, frame, footer, theme);
}

fn draw_header(state: &State, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let mut spans = vec![Span::styled(
        "Field Builder",
        Style::default()
            .fg(theme.accent_primary)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(fields) = state.fields.as_success() {
        spans.push(Span::styled(
            format!("  {} fields", fields.len()),
            Style::default().fg(theme.text_secondary),
        ));
    }
    if state.refreshing {
        spans.push(Span::styled(
            "  refreshing…",
            Style::default().fg(theme.text_tertiary),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_banner(state: &State, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let message = format!(
        "⚠ Some field data failed to load: {}",
        state.partial_errors.join("; ")
    );
    frame.render_widget(
        Paragraph::new(message).style(Style::default().fg(theme.accent_warning)),
        area,
    );
}

fn draw_content(state: &mut State, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    match &state.fields {
        Resource::NotAsked | Resource::Loading => {
            frame.render_widget(
                Paragraph::new("Loading fields…")
                    .style(Style::default().fg(theme.text_secondary)),
                area,
            );
        }
        Resource::Failure(message) => {
            let lines = vec![
                Line::styled(
                    "Failed to load fields",
                    Style::default()
                        .fg(theme.accent_error)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::styled(message.clone(), Style::default().fg(theme.text_secondary)),
                Line::styled(
                    "Press r to retry",
                    Style::default().fg(theme.text_tertiary),
                ),
            ];
            frame.render_widget(Paragraph::new(lines), area);
        }
        Resource::Success(fields) if fields.is_empty() => {
            frame.render_widget(
                Paragraph::new("No fields yet. Press n to create the first one.")
                    .style(Style::default().fg(theme.text_secondary)),
                area,
            );
        }
        Resource::Success(fields) => {
            // Cards have uneven heights, so build the lines first and scroll
            // by whole cards.
            let cards: Vec<Vec<Line<'_>>> = fields
                .iter()
                .enumerate()
                .map(|(index, field)| {
                    card_lines(
                        field,
                        state.expanded.contains(&field.id),
                        state.list_state.selected() == Some(index),
                        theme,
                    )
                })
                .collect();

            let viewport = area.height as usize;
            let selected = state
                .list_state
                .selected()
                .unwrap_or(0)
                .min(cards.len().saturating_sub(1));
            state.list_state.scroll_to_selection(|offset| {
                let used: usize = cards[offset..=selected].iter().map(Vec::len).sum();
                used <= viewport
            });

            let mut y = area.y;
            for card in cards.iter().skip(state.list_state.scroll_offset()) {
                if y >= area.bottom() {
                    break;
                }
                let height = (card.len() as u16).min(area.bottom() - y);
                let slot = Rect::new(area.x, y, area.width, height);
                frame.render_widget(Paragraph::new(card.clone()), slot);
                y += card.len() as u16;
            }
        }
    }
}

/// Lines of one field card. Collapsed cards show the headline and one meta
/// row; expanded cards add every stored attribute. A trailing blank line
/// separates cards.
fn card_lines<'a>(field: &'a Field, expanded: bool, selected: bool, theme: &Theme) -> Vec<Line<'a>> {
    let marker = if expanded { "▾" } else { "▸" };
    let headline_style = if selected {
        Style::default()
            .fg(theme.accent_primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD)
    };

    let mut headline = vec![
        Span::styled(format!("{marker} {}", field.label), headline_style),
        Span::styled(
            format!("  {}", field.field_type.wire_name()),
            Style::default().fg(theme.accent_success),
        ),
    ];
    if let Some(select_type) = field.select_type {
        headline.push(Span::styled(
            format!(" · {}", select_type.display_name()),
            Style::default().fg(theme.text_secondary),
        ));
    }
    if field.is_value_required {
        headline.push(Span::styled(
            " · required",
            Style::default().fg(theme.accent_warning),
        ));
    }

    let mut meta = format!("  Updated {}", field.updated_at.format("%b %-d, %Y"));
    if let Some(placeholder) = &field.placeholder {
        meta.push_str(&format!(" · “{placeholder}”"));
    }

    let mut lines = vec![
        Line::from(headline),
        Line::styled(meta, Style::default().fg(theme.text_tertiary)),
    ];

    if expanded {
        let detail = Style::default().fg(theme.text_secondary);
        if let Some(default_value) = &field.default_value {
            lines.push(Line::styled(format!("  Default: {default_value}"), detail));
        }
        if let Some(options) = &field.options {
            let shown: Vec<&str> = options.iter().take(4).map(String::as_str).collect();
            let mut row = format!("  Choices ({}): {}", options.len(), shown.join(", "));
            if options.len() > shown.len() {
                row.push_str(&format!(" (+{} more)", options.len() - shown.len()));
            }
            lines.push(Line::styled(row, detail));
        }
        if let Some(order) = field.order_type {
            lines.push(Line::styled(format!("  Order: {}", order.label()), detail));
        }
        lines.push(Line::styled(
            format!(
                "  Created {} · id {}",
                field.created_at.format("%b %-d, %Y"),
                field.id
            ),
            Style::default().fg(theme.text_tertiary),
        ));
    }

    lines.push(Line::default());
    lines
}

fn draw_footer(state: &State, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let [status_row, hint_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let status_color = match state.status.level() {
        StatusLevel::Info => theme.text_secondary,
        StatusLevel::Success => theme.accent_success,
        StatusLevel::Error => theme.accent_error,
    };
    frame.render_widget(
        Paragraph::new(state.status.message().to_string())
            .style(Style::default().fg(status_color)),
        status_row,
    );

    let hints = if state.create.is_some() {
        "tab Next field · shift+tab Previous · ↵ Commit".to_string()
    } else {
        let mut parts = vec!["↑↓ Navigate".to_string(), "↵ Expand".to_string()];
        parts.extend(
            FieldsApp::subscriptions(state)
                .iter()
                .map(|subscription| subscription.hint()),
        );
        parts.join(" · ")
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(theme.text_tertiary)),
        hint_row,
    );
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::api::models::{FieldType, OrderType, SelectType};

    fn select_field() -> Field {
        Field {
            id: "field-1".into(),
            label: "Status".into(),
            field_type: FieldType::Select,
            is_value_required: true,
            default_value: Some("Open".into()),
            options: Some(vec![
                "Open".into(),
                "Closed".into(),
                "Blocked".into(),
                "Waiting".into(),
                "Archived".into(),
                "Draft".into(),
            ]),
            order_type: Some(OrderType::Alphabetical),
            select_type: Some(SelectType::SingleSelect),
            placeholder: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn rendered(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn collapsed_card_is_headline_meta_and_separator() {
        let field = select_field();
        let lines = card_lines(&field, false, false, &Theme::default());
        assert_eq!(lines.len(), 3);
        let text = rendered(&lines);
        assert!(text.contains("Status"));
        assert!(text.contains("SELECT"));
        assert!(text.contains("required"));
        assert!(!text.contains("Choices"));
    }

    #[test]
    fn expanded_card_truncates_the_choice_list() {
        let field = select_field();
        let lines = card_lines(&field, true, false, &Theme::default());
        let text = rendered(&lines);
        assert!(text.contains("Choices (6): Open, Closed, Blocked, Waiting (+2 more)"));
        assert!(text.contains("Default: Open"));
        assert!(text.contains("Order: Alphabetical"));
        assert!(text.contains("id field-1"));
    }
}
