use std::collections::HashSet;
use std::sync::Arc;

use crossterm::event::KeyCode;

use crate::api::models::{Field, FieldType, FieldsPage, OrderType, SelectType};
use crate::api::FieldsApi;
use crate::draft::DraftStore;
use crate::form::{FormController, SubmitError, SubmitSuccess};
use crate::tui::modal::ModalHandle;
use crate::tui::resource::Resource;
use crate::tui::status::StatusLine;
use crate::tui::widgets::{ListState, SelectState, TextInputState};

/// Everything the dashboard needs handed in at startup.
pub struct FieldsParams {
    pub api: Arc<dyn FieldsApi>,
    pub store: DraftStore,
}

/// Dialog kinds this app can put on the modal stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldsModal {
    CreateField,
}

#[derive(Debug)]
pub enum Msg {
    FieldsLoaded(Result<FieldsPage, String>),
    Refresh,
    ListKey(KeyCode),
    ToggleExpand,
    OpenCreate,
    CloseCreate,
    FocusNext,
    FocusPrev,
    FieldTypeKey(KeyCode),
    LabelKey(KeyCode),
    SelectTypeKey(KeyCode),
    ToggleValueRequired,
    DefaultValueKey(KeyCode),
    NewChoiceKey(KeyCode),
    ChoicesKey(KeyCode),
    OrderKey(KeyCode),
    AddDefaultAsChoice,
    Submit,
    SubmitFinished(Result<SubmitSuccess, SubmitError>),
    Quit,
}

pub struct State {
    pub api: Arc<dyn FieldsApi>,
    pub store: DraftStore,
    pub modals: ModalHandle<FieldsModal>,
    pub fields: Resource<Vec<Field>>,
    /// A refetch is in flight while the previous page stays on screen.
    pub refreshing: bool,
    /// Error messages from the last partially failed list query.
    pub partial_errors: Vec<String>,
    pub list_state: ListState,
    pub expanded: HashSet<String>,
    pub status: StatusLine,
    pub create: Option<CreateFieldState>,
}

impl State {
    pub fn selected_field(&self) -> Option<&Field> {
        let fields = self.fields.as_success()?;
        fields.get(self.list_state.selected()?)
    }
}

/// Rows of the create dialog that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateFocus {
    FieldType,
    Label,
    SelectType,
    ValueRequired,
    DefaultValue,
    NewChoice,
    Choices,
    Order,
    Submit,
    Cancel,
}

pub const FIELD_TYPE_OPTIONS: [FieldType; 2] = [FieldType::Select, FieldType::Text];
pub const SELECT_TYPE_OPTIONS: [SelectType; 2] =
    [SelectType::SingleSelect, SelectType::MultiSelect];
pub const ORDER_OPTIONS: [OrderType; 2] =
    [OrderType::Alphabetical, OrderType::ReverseAlphabetical];

/// Per-dialog state of the create form. The draft itself lives inside the
/// [`FormController`]; this adds the widget states and the focus ring.
pub struct CreateFieldState {
    pub modal_id: String,
    pub form: FormController,
    pub focus: CreateFocus,
    pub label_input: TextInputState,
    pub default_input: TextInputState,
    /// Text typed into the new-choice row, pending until committed.
    pub new_choice: String,
    pub choice_input: TextInputState,
    pub choice_cursor: usize,
    pub field_type_select: SelectState,
    pub select_type_select: SelectState,
    pub order_select: SelectState,
    pub submitting: bool,
}

impl CreateFieldState {
    pub fn new(modal_id: String, form: FormController) -> Self {
        let draft = form.draft();

        let mut label_input = TextInputState::default();
        label_input.set_cursor_to_end(&draft.label);
        let mut default_input = TextInputState::default();
        default_input.set_cursor_to_end(&draft.default_value);

        let mut field_type_select = SelectState::default();
        if let Some(index) = draft
            .field_type
            .and_then(|value| FIELD_TYPE_OPTIONS.iter().position(|o| *o == value))
        {
            field_type_select.highlight(index);
        }
        let mut select_type_select = SelectState::default();
        if let Some(index) = draft
            .select_type
            .and_then(|value| SELECT_TYPE_OPTIONS.iter().position(|o| *o == value))
        {
            select_type_select.highlight(index);
        }
        let mut order_select = SelectState::default();
        if let Some(index) = draft
            .order
            .and_then(|value| ORDER_OPTIONS.iter().position(|o| *o == value))
        {
            order_select.highlight(index);
        }

        Self {
            modal_id,
            form,
            focus: CreateFocus::FieldType,
            label_input,
            default_input,
            new_choice: String::new(),
            choice_input: TextInputState::default(),
            choice_cursor: 0,
            field_type_select,
            select_type_select,
            order_select,
            submitting: false,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
            && self.form.errors().is_empty()
            && self.form.draft().field_type.is_some()
    }

    /// The default value can be promoted into the choice list: SELECT field,
    /// non-empty value, not already a choice, list not full.
    pub fn can_add_default(&self) -> bool {
        let draft = self.form.draft();
        draft.field_type == Some(FieldType::Select)
            && !draft.default_value.is_empty()
            && !draft.options.iter().any(|o| o == &draft.default_value)
            && !draft.has_maximum_options()
    }

    /// Rows reachable with Tab in the current draft shape. Rows a field type
    /// does not use simply drop out of the ring.
    pub fn focus_ring(&self) -> Vec<CreateFocus> {
        let draft = self.form.draft();
        let mut ring = vec![CreateFocus::FieldType];
        if let Some(field_type) = draft.field_type {
            let spec = field_type.spec();
            ring.push(CreateFocus::Label);
            if spec.requires_select_type {
                ring.push(CreateFocus::SelectType);
            }
            ring.push(CreateFocus::ValueRequired);
            ring.push(CreateFocus::DefaultValue);
            if spec.has_options {
                ring.push(CreateFocus::NewChoice);
                if !draft.options.is_empty() {
                    ring.push(CreateFocus::Choices);
                }
            }
            if spec.has_order {
                ring.push(CreateFocus::Order);
            }
        }
        ring.push(CreateFocus::Submit);
        ring.push(CreateFocus::Cancel);
        ring
    }

    pub fn shift_focus(&mut self, delta: isize) {
        let ring = self.focus_ring();
        let current = ring
            .iter()
            .position(|focus| *focus == self.focus)
            .unwrap_or(0) as isize;
        let len = ring.len() as isize;
        self.focus = ring[(current + delta).rem_euclid(len) as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{DraftEdit, FormAction};

    fn create_state() -> (CreateFieldState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::at(dir.path().join("draft.json"));
        let form = FormController::hydrate(store);
        (CreateFieldState::new("modal-test".into(), form), dir)
    }

    #[test]
    fn empty_draft_ring_is_type_then_buttons() {
        let (create, _dir) = create_state();
        assert_eq!(
            create.focus_ring(),
            vec![
                CreateFocus::FieldType,
                CreateFocus::Submit,
                CreateFocus::Cancel
            ]
        );
    }

    #[test]
    fn select_draft_ring_includes_every_select_row() {
        let (mut create, _dir) = create_state();
        create
            .form
            .dispatch(FormAction::Set(DraftEdit::FieldType(Some(
                FieldType::Select,
            ))));
        create.form.add_option("Open".into());
        assert_eq!(
            create.focus_ring(),
            vec![
                CreateFocus::FieldType,
                CreateFocus::Label,
                CreateFocus::SelectType,
                CreateFocus::ValueRequired,
                CreateFocus::DefaultValue,
                CreateFocus::NewChoice,
                CreateFocus::Choices,
                CreateFocus::Order,
                CreateFocus::Submit,
                CreateFocus::Cancel
            ]
        );
    }

    #[test]
    fn text_draft_ring_skips_select_rows() {
        let (mut create, _dir) = create_state();
        create
            .form
            .dispatch(FormAction::Set(DraftEdit::FieldType(Some(FieldType::Text))));
        assert_eq!(
            create.focus_ring(),
            vec![
                CreateFocus::FieldType,
                CreateFocus::Label,
                CreateFocus::ValueRequired,
                CreateFocus::DefaultValue,
                CreateFocus::Submit,
                CreateFocus::Cancel
            ]
        );
    }

    #[test]
    fn shift_focus_wraps_in_both_directions() {
        let (mut create, _dir) = create_state();
        create.shift_focus(-1);
        assert_eq!(create.focus, CreateFocus::Cancel);
        create.shift_focus(1);
        assert_eq!(create.focus, CreateFocus::FieldType);
    }

    #[test]
    fn default_value_promotion_requires_a_fresh_select_value() {
        let (mut create, _dir) = create_state();
        assert!(!create.can_add_default());

        create
            .form
            .dispatch(FormAction::Set(DraftEdit::FieldType(Some(
                FieldType::Select,
            ))));
        create
            .form
            .dispatch(FormAction::Set(DraftEdit::DefaultValue("Open".into())));
        assert!(create.can_add_default());

        create.form.add_option("Open".into());
        assert!(!create.can_add_default());
    }
}
