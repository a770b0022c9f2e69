//! Effect layer over the pure reducer: draft persistence and the
//! edit-clears-error side channel.

use crate::draft::DraftStore;

use super::reducer::{
    DraftEdit, DraftField, FieldDraft, FormAction, FormState, ValidationErrors, reduce,
};

pub struct FormController {
    state: FormState,
    store: DraftStore,
}

impl FormController {
    /// Start the controller with the saved draft (if any) merged over the
    /// empty initial draft. Errors always start empty.
    pub fn hydrate(store: DraftStore) -> Self {
        let draft = store.load().unwrap_or_default();
        Self {
            state: FormState {
                draft,
                errors: ValidationErrors::new(),
            },
            store,
        }
    }

    pub fn draft(&self) -> &FieldDraft {
        &self.state.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.state.errors
    }

    pub fn error_for(&self, field: DraftField) -> Option<&str> {
        self.state.errors.get(&field).map(String::as_str)
    }

    /// Guarded option append: only meaningful on SELECT fields, refuses
    /// duplicates, and refuses silently once the choice list is full.
    pub fn add_option(&mut self, value: String) {
        let draft = &self.state.draft;
        if draft.field_type != Some(crate::api::models::FieldType::Select) {
            return;
        }
        if draft.has_maximum_options() || draft.options.iter().any(|option| option == &value) {
            return;
        }
        self.dispatch(FormAction::AddOption(value));
    }

    pub fn remove_option(&mut self, value: String) {
        if self.state.draft.field_type != Some(crate::api::models::FieldType::Select) {
            return;
        }
        self.dispatch(FormAction::RemoveOption(value));
    }

    /// Run one action through the reducer and re-persist the draft.
    ///
    /// Editing `label` or `select_type` while that key carries an error
    /// clears exactly that key first, so the highlighting disappears as soon
    /// as the user touches the offending field. Error-map changes are never
    /// persisted; `Reset` clears the store.
    pub fn dispatch(&mut self, action: FormAction) {
        if let FormAction::Set(edit) = &action {
            let cleared_key = match edit {
                DraftEdit::Label(_) => Some(DraftField::Label),
                DraftEdit::SelectType(_) => Some(DraftField::SelectType),
                _ => None,
            };
            if let Some(key) = cleared_key {
                self.state.errors.remove(&key);
            }
        }

        let errors_only = matches!(action, FormAction::SetErrors(_));
        let is_reset = matches!(action, FormAction::Reset);
        self.state = reduce(std::mem::take(&mut self.state), action);

        if is_reset {
            if let Err(err) = self.store.clear() {
                log::warn!("failed to clear draft: {err:#}");
            }
        } else if !errors_only {
            if let Err(err) = self.store.save(&self.state.draft) {
                log::warn!("failed to persist draft: {err:#}");
            }
        }
    }

    /// Merge new validation errors over the existing map, preserving
    /// unrelated pre-existing entries.
    pub fn merge_errors(&mut self, new_errors: ValidationErrors) {
        let mut merged = self.state.errors.clone();
        merged.extend(new_errors);
        self.dispatch(FormAction::SetErrors(merged));
    }
}
