//! Pure state machine for the field-under-construction.
//!
//! `reduce` has no side effects and no dependencies on the UI or the
//! network; persistence and error toasts live in [`super::controller`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::models::{FieldType, OrderType, SelectType};

/// Hard cap on the choice list of a SELECT field.
pub const MAX_OPTIONS: usize = 50;

/// The in-progress, not-yet-submitted field definition.
///
/// Every key is individually defaulted so a partially persisted draft from a
/// prior session merges over the empty draft on hydration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDraft {
    pub field_type: Option<FieldType>,
    pub label: String,
    pub select_type: Option<SelectType>,
    pub is_value_required: bool,
    pub default_value: String,
    pub options: Vec<String>,
    pub order: Option<OrderType>,
}

impl FieldDraft {
    /// Derived, never stored: the choice list is full.
    pub fn has_maximum_options(&self) -> bool {
        self.options.len() >= MAX_OPTIONS
    }
}

/// Keys of the draft that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DraftField {
    FieldType,
    Label,
    SelectType,
}

impl DraftField {
    pub fn display_name(&self) -> &'static str {
        match self {
            DraftField::FieldType => "Field Type",
            DraftField::Label => "Label",
            DraftField::SelectType => "Select Type",
        }
    }
}

/// Human-readable message per offending draft key.
pub type ValidationErrors = BTreeMap<DraftField, String>;

/// Replacement value for a single draft attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    FieldType(Option<FieldType>),
    Label(String),
    SelectType(Option<SelectType>),
    ValueRequired(bool),
    DefaultValue(String),
    Order(Option<OrderType>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Set(DraftEdit),
    AddOption(String),
    RemoveOption(String),
    SetErrors(ValidationErrors),
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub draft: FieldDraft,
    pub errors: ValidationErrors,
}

/// Pure transition function: `(state, action) -> state`.
pub fn reduce(mut state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::Set(edit) => {
            match edit {
                DraftEdit::FieldType(value) => state.draft.field_type = value,
                DraftEdit::Label(value) => state.draft.label = value,
                DraftEdit::SelectType(value) => state.draft.select_type = value,
                DraftEdit::ValueRequired(value) => state.draft.is_value_required = value,
                DraftEdit::DefaultValue(value) => state.draft.default_value = value,
                DraftEdit::Order(value) => state.draft.order = value,
            }
            state
        }
        FormAction::AddOption(value) => {
            state.draft.options.push(value);
            state
        }
        FormAction::RemoveOption(value) => {
            state.draft.options.retain(|option| option != &value);
            state
        }
        FormAction::SetErrors(errors) => {
            state.errors = errors;
            state
        }
        FormAction::Reset => FormState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> FormState {
        FormState {
            draft: FieldDraft {
                field_type: Some(FieldType::Select),
                label: "Status".into(),
                select_type: Some(SelectType::SingleSelect),
                is_value_required: true,
                default_value: "Open".into(),
                options: vec!["Open".into(), "Closed".into()],
                order: Some(OrderType::Alphabetical),
            },
            errors: ValidationErrors::new(),
        }
    }

    #[test]
    fn set_overwrites_only_the_targeted_key() {
        let initial = populated();
        let next = reduce(
            initial.clone(),
            FormAction::Set(DraftEdit::Label("Priority".into())),
        );
        assert_eq!(next.draft.label, "Priority");

        let mut expected = initial;
        expected.draft.label = "Priority".into();
        assert_eq!(next, expected);
    }

    #[test]
    fn sequences_of_sets_touch_no_other_keys() {
        let mut state = FormState::default();
        state = reduce(state, FormAction::Set(DraftEdit::ValueRequired(true)));
        state = reduce(state, FormAction::Set(DraftEdit::DefaultValue("X".into())));
        state = reduce(
            state,
            FormAction::Set(DraftEdit::Order(Some(OrderType::ReverseAlphabetical))),
        );
        assert!(state.draft.field_type.is_none());
        assert!(state.draft.label.is_empty());
        assert!(state.draft.options.is_empty());
        assert!(state.draft.is_value_required);
        assert_eq!(state.draft.default_value, "X");
        assert_eq!(state.draft.order, Some(OrderType::ReverseAlphabetical));
    }

    #[test]
    fn add_option_appends_in_order() {
        let mut state = FormState::default();
        state = reduce(state, FormAction::AddOption("B".into()));
        state = reduce(state, FormAction::AddOption("A".into()));
        assert_eq!(state.draft.options, vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn remove_option_removes_every_match_and_nothing_else() {
        let mut state = FormState::default();
        for value in ["A", "B", "A", "C"] {
            state = reduce(state, FormAction::AddOption(value.into()));
        }
        state = reduce(state, FormAction::RemoveOption("A".into()));
        assert_eq!(state.draft.options, vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn removing_an_absent_value_is_a_no_op() {
        let state = populated();
        let next = reduce(state.clone(), FormAction::RemoveOption("Missing".into()));
        assert_eq!(next, state);
    }

    #[test]
    fn set_errors_replaces_the_map_wholesale() {
        let mut state = populated();
        state.errors.insert(DraftField::Label, "old".into());
        let mut replacement = ValidationErrors::new();
        replacement.insert(DraftField::SelectType, "new".into());
        let next = reduce(state, FormAction::SetErrors(replacement.clone()));
        assert_eq!(next.errors, replacement);
    }

    #[test]
    fn reset_returns_to_the_empty_initial_state() {
        let next = reduce(populated(), FormAction::Reset);
        assert_eq!(next, FormState::default());
    }
}
