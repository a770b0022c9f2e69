//! The create-field form, rendered inside the dialog chrome.
//!
//! The rows a draft shows follow [`FieldType::spec`]: a TEXT field is just
//! label, required flag and default value; a SELECT field adds the sub-kind,
//! the choice list and the order policy.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::form::{DraftField, MAX_OPTIONS};
use crate::tui::theme::Theme;
use crate::tui::widgets::{SelectState, TextInputState};

use super::super::state::{
    CreateFieldState, CreateFocus, FIELD_TYPE_OPTIONS, ORDER_OPTIONS, SELECT_TYPE_OPTIONS,
};

const LABEL_WIDTH: usize = 16;
const CHOICES_SHOWN: usize = 5;

pub fn draw_create_field(
    create: &CreateFieldState,
    frame: &mut Frame<'_>,
    area: Rect,
    theme: &Theme,
) {
    frame.render_widget(Paragraph::new(form_lines(create, theme)), area);
}

fn form_lines(create: &CreateFieldState, theme: &Theme) -> Vec<Line<'static>> {
    let draft = create.form.draft();
    let mut lines: Vec<Line<'static>> = Vec::new();

    select_row(
        &mut lines,
        "Field Type",
        draft.field_type.map(|value| value.label()),
        &FIELD_TYPE_OPTIONS.map(|value| value.label()),
        &create.field_type_select,
        create.focus == CreateFocus::FieldType,
        false,
        theme,
    );

    let Some(field_type) = draft.field_type else {
        lines.push(Line::default());
        lines.push(Line::styled(
            "  Choose a field type to configure the rest of the form.",
            Style::default().fg(theme.text_tertiary),
        ));
        lines.push(Line::default());
        button_row(&mut lines, create, theme);
        return lines;
    };
    let spec = field_type.spec();

    let label_error = create.form.error_for(DraftField::Label).is_some();
    input_row(
        &mut lines,
        "Label",
        &draft.label,
        &create.label_input,
        create.focus == CreateFocus::Label,
        label_error,
        theme,
    );
    if label_error {
        lines.push(Line::styled(
            "  Label is required",
            Style::default().fg(theme.accent_error),
        ));
    }

    if spec.requires_select_type {
        let select_type_error = create.form.error_for(DraftField::SelectType).is_some();
        select_row(
            &mut lines,
            "Select Type",
            draft.select_type.map(|value| value.label()),
            &SELECT_TYPE_OPTIONS.map(|value| value.label()),
            &create.select_type_select,
            create.focus == CreateFocus::SelectType,
            select_type_error,
            theme,
        );
        if select_type_error {
            lines.push(Line::styled(
                "  Select Type is required",
                Style::default().fg(theme.accent_error),
            ));
        }
    }

    let required_focused = create.focus == CreateFocus::ValueRequired;
    let checkbox = if draft.is_value_required { "[x]" } else { "[ ]" };
    lines.push(Line::from(vec![
        row_label("Value Required", required_focused, false, theme),
        Span::styled(
            format!("{checkbox} required on entry"),
            Style::default().fg(if required_focused {
                theme.text_primary
            } else {
                theme.text_secondary
            }),
        ),
    ]));

    input_row(
        &mut lines,
        "Default Value",
        &draft.default_value,
        &create.default_input,
        create.focus == CreateFocus::DefaultValue,
        false,
        theme,
    );
    if create.can_add_default() && create.focus == CreateFocus::DefaultValue {
        lines.push(Line::styled(
            "  ↵ add as a choice",
            Style::default().fg(theme.text_tertiary),
        ));
    }

    if spec.has_options {
        if draft.has_maximum_options() {
            lines.push(Line::from(vec![
                row_label("New Choice", false, false, theme),
                Span::styled(
                    format!("choice limit reached ({MAX_OPTIONS})"),
                    Style::default().fg(theme.accent_warning),
                ),
            ]));
        } else {
            input_row(
                &mut lines,
                "New Choice",
                &create.new_choice,
                &create.choice_input,
                create.focus == CreateFocus::NewChoice,
                false,
                theme,
            );
        }
        choice_list(&mut lines, create, theme);
    }

    if spec.has_order {
        select_row(
            &mut lines,
            "Order",
            draft.order.map(|value| value.label()),
            &ORDER_OPTIONS.map(|value| value.label()),
            &create.order_select,
            create.focus == CreateFocus::Order,
            false,
            theme,
        );
    }

    lines.push(Line::default());
    button_row(&mut lines, create, theme);
    lines
}

fn row_label(text: &str, focused: bool, error: bool, theme: &Theme) -> Span<'static> {
    let marker = if focused { "❯ " } else { "  " };
    let mut style = Style::default().fg(if error {
        theme.accent_error
    } else if focused {
        theme.accent_primary
    } else {
        theme.text_secondary
    });
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(
        format!("{marker}{text:<width$}", width = LABEL_WIDTH),
        style,
    )
}

/// A single-line text input row; the cursor cell renders reversed while the
/// row holds focus.
fn input_row(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    input: &TextInputState,
    focused: bool,
    error: bool,
    theme: &Theme,
) {
    let mut spans = vec![row_label(label, focused, error, theme)];
    let text_style = Style::default().fg(theme.text_primary);
    if focused {
        let chars: Vec<char> = value.chars().collect();
        let cursor = input.cursor().min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let at: String = chars.get(cursor).map(|c| c.to_string()).unwrap_or(" ".into());
        let after: String = chars.iter().skip(cursor + 1).collect();
        spans.push(Span::styled(before, text_style));
        spans.push(Span::styled(at, text_style.add_modifier(Modifier::REVERSED)));
        spans.push(Span::styled(after, text_style));
    } else if value.is_empty() {
        spans.push(Span::styled("—", Style::default().fg(theme.text_tertiary)));
    } else {
        spans.push(Span::styled(value.to_string(), text_style));
    }
    lines.push(Line::from(spans));
}

/// A dropdown row; while open, the options render indented underneath with
/// the highlight marked.
fn select_row(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    current: Option<&'static str>,
    options: &[&'static str],
    select: &SelectState,
    focused: bool,
    error: bool,
    theme: &Theme,
) {
    let value = current.unwrap_or("— choose —");
    let value_style = if current.is_some() {
        Style::default().fg(theme.text_primary)
    } else {
        Style::default().fg(theme.text_tertiary)
    };
    lines.push(Line::from(vec![
        row_label(label, focused, error, theme),
        Span::styled(value.to_string(), value_style),
        Span::styled(
            if select.is_open() { " ▴" } else { " ▾" },
            Style::default().fg(theme.text_tertiary),
        ),
    ]));

    if select.is_open() {
        for (index, option) in options.iter().enumerate() {
            let highlighted = index == select.highlighted();
            let (marker, style) = if highlighted {
                (
                    "● ",
                    Style::default()
                        .fg(theme.accent_primary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("○ ", Style::default().fg(theme.text_secondary))
            };
            lines.push(Line::styled(
                format!("    {marker}{option}"),
                style,
            ));
        }
    }
}

/// The committed choices, windowed around the cursor so long lists stay
/// inside the dialog.
fn choice_list(lines: &mut Vec<Line<'static>>, create: &CreateFieldState, theme: &Theme) {
    let options = &create.form.draft().options;
    if options.is_empty() {
        return;
    }
    let focused = create.focus == CreateFocus::Choices;
    lines.push(Line::from(vec![
        row_label("Choices", focused, false, theme),
        Span::styled(
            format!("{} of {MAX_OPTIONS}", options.len()),
            Style::default().fg(theme.text_tertiary),
        ),
    ]));

    let start = create
        .choice_cursor
        .saturating_sub(CHOICES_SHOWN - 1)
        .min(options.len().saturating_sub(CHOICES_SHOWN));
    let window = &options[start..(start + CHOICES_SHOWN).min(options.len())];
    for (offset, option) in window.iter().enumerate() {
        let index = start + offset;
        let cursor_here = focused && index == create.choice_cursor;
        let style = if cursor_here {
            Style::default()
                .fg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_secondary)
        };
        let marker = if cursor_here { "❯ " } else { "  " };
        let hint = if cursor_here { "  (⌫ remove)" } else { "" };
        lines.push(Line::styled(format!("    {marker}{option}{hint}"), style));
    }
    let hidden = options.len() - window.len();
    if hidden > 0 {
        lines.push(Line::styled(
            format!("      +{hidden} more"),
            Style::default().fg(theme.text_tertiary),
        ));
    }
}

fn button_row(lines: &mut Vec<Line<'static>>, create: &CreateFieldState, theme: &Theme) {
    let cancel_focused = create.focus == CreateFocus::Cancel;
    let submit_focused = create.focus == CreateFocus::Submit;

    let cancel_style = if cancel_focused {
        Style::default()
            .fg(theme.accent_primary)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(theme.text_secondary)
    };
    let save_style = if create.submitting || !create.can_submit() {
        Style::default().fg(theme.text_tertiary)
    } else if submit_focused {
        Style::default()
            .fg(theme.accent_success)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(theme.accent_success)
    };
    let save_text = if create.submitting {
        "[ Saving… ]"
    } else {
        "[  Save  ]"
    };

    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("[ Cancel ]", cancel_style),
        Span::raw("   "),
        Span::styled(save_text.to_string(), save_style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::FieldType;
    use crate::draft::DraftStore;
    use crate::form::{DraftEdit, FormAction, FormController, ValidationErrors};

    fn create_state() -> (CreateFieldState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::at(dir.path().join("draft.json"));
        let form = FormController::hydrate(store);
        (CreateFieldState::new("modal-test".into(), form), dir)
    }

    fn rendered(create: &CreateFieldState) -> String {
        form_lines(create, &Theme::default())
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
    fn empty_draft_shows_only_the_type_row_and_buttons() {
        let (create, _dir) = create_state();
        let text = rendered(&create);
        assert!(text.contains("Field Type"));
        assert!(text.contains("Choose a field type"));
        assert!(!text.contains("Label"));
        assert!(text.contains("[ Cancel ]"));
    }

    #[test]
    fn text_field_form_has_no_select_rows() {
        let (mut create, _dir) = create_state();
        create
            .form
            .dispatch(FormAction::Set(DraftEdit::FieldType(Some(FieldType::Text))));
        let text = rendered(&create);
        assert!(text.contains("Label"));
        assert!(text.contains("Value Required"));
        assert!(text.contains("Default Value"));
        assert!(!text.contains("Select Type"));
        assert!(!text.contains("New Choice"));
        assert!(!text.contains("Order"));
    }

    #[test]
    fn select_field_form_shows_every_select_row() {
        let (mut create, _dir) = create_state();
        create
            .form
            .dispatch(FormAction::Set(DraftEdit::FieldType(Some(
                FieldType::Select,
            ))));
        create.form.add_option("Open".into());
        let text = rendered(&create);
        assert!(text.contains("Select Type"));
        assert!(text.contains("New Choice"));
        assert!(text.contains("Choices"));
        assert!(text.contains("1 of 50"));
        assert!(text.contains("Open"));
        assert!(text.contains("Order"));
    }

    #[test]
    fn validation_errors_annotate_their_rows() {
        let (mut create, _dir) = create_state();
        create
            .form
            .dispatch(FormAction::Set(DraftEdit::FieldType(Some(
                FieldType::Select,
            ))));
        let mut errors = ValidationErrors::new();
        errors.insert(DraftField::Label, "Label".into());
        errors.insert(DraftField::SelectType, "Select Type".into());
        create.form.merge_errors(errors);

        let text = rendered(&create);
        assert!(text.contains("Label is required"));
        assert!(text.contains("Select Type is required"));
    }

    #[test]
    fn full_choice_list_replaces_the_input_with_a_limit_notice() {
        let (mut create, _dir) = create_state();
        create
            .form
            .dispatch(FormAction::Set(DraftEdit::FieldType(Some(
                FieldType::Select,
            ))));
        for i in 0..MAX_OPTIONS {
            create.form.add_option(format!("choice-{i}"));
        }
        let text = rendered(&create);
        assert!(text.contains("choice limit reached (50)"));
        assert!(text.contains("+45 more"));
    }
}
