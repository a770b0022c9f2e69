use std::collections::HashSet;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::api::models::FieldsPage;
use crate::api::FieldsApi;
use crate::form::{DraftEdit, DraftField, FormAction, FormController, SubmitError, submit};
use crate::tui::app::App;
use crate::tui::command::Command;
use crate::tui::modal::{ModalConfig, ModalEntry, ModalHandle, ModalOptions};
use crate::tui::resource::Resource;
use crate::tui::status::StatusLine;
use crate::tui::subscription::Subscription;
use crate::tui::theme::Theme;
use crate::tui::widgets::{ListState, SelectOutcome, TextInputState};

use super::state::{
    CreateFieldState, CreateFocus, FIELD_TYPE_OPTIONS, FieldsModal, FieldsParams, Msg,
    ORDER_OPTIONS, SELECT_TYPE_OPTIONS, State,
};
use super::{modals, view};

pub struct FieldsApp;

impl App for FieldsApp {
    type State = State;
    type Msg = Msg;
    type Modal = FieldsModal;
    type InitParams = FieldsParams;

    fn init(params: FieldsParams, modals: ModalHandle<FieldsModal>) -> (State, Command<Msg>) {
        let state = State {
            api: params.api,
            store: params.store,
            modals,
            fields: Resource::Loading,
            refreshing: false,
            partial_errors: Vec::new(),
            list_state: ListState::with_selection(),
            expanded: HashSet::new(),
            status: StatusLine::new(),
            create: None,
        };
        let api = state.api.clone();
        (
            state,
            Command::perform(async move { load_fields(api).await }, Msg::FieldsLoaded),
        )
    }

    fn update(state: &mut State, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::FieldsLoaded(Ok(page)) => {
                state.refreshing = false;
                if page.is_partial() {
                    log::warn!("list query partially failed: {:?}", page.errors);
                }
                state.partial_errors = page.errors;
                state.list_state.clamp(page.fields.len());
                state.fields = Resource::Success(page.fields);
                Command::None
            }
            Msg::FieldsLoaded(Err(message)) => {
                state.refreshing = false;
                // A failed refetch keeps the last good page on screen.
                if matches!(state.fields, Resource::Success(_)) {
                    state.status.error(format!("Refresh failed: {message}"));
                } else {
                    state.fields = Resource::Failure(message);
                }
                Command::None
            }
            Msg::Refresh => {
                if state.refreshing || state.fields.is_loading() {
                    return Command::None;
                }
                if matches!(state.fields, Resource::Success(_)) {
                    state.refreshing = true;
                } else {
                    state.fields = Resource::Loading;
                }
                let api = state.api.clone();
                Command::perform(async move { load_fields(api).await }, Msg::FieldsLoaded)
            }
            Msg::ListKey(code) => {
                if let Some(fields) = state.fields.as_success() {
                    let count = fields.len();
                    state.list_state.handle_key(code, count);
                }
                Command::None
            }
            Msg::ToggleExpand => {
                if let Some(id) = state.selected_field().map(|field| field.id.clone()) {
                    if !state.expanded.remove(&id) {
                        state.expanded.insert(id);
                    }
                }
                Command::None
            }
            Msg::OpenCreate => {
                if state.create.is_some() {
                    return Command::None;
                }
                let form = FormController::hydrate(state.store.clone());
                let config = ModalConfig::new(FieldsModal::CreateField)
                    .options(ModalOptions {
                        title: "Field Builder".into(),
                        close_on_escape: false,
                        close_on_backdrop: false,
                        show_close_control: false,
                        width: 70,
                        height: 26,
                    })
                    .restore_focus("field-list")
                    .restore_scroll(state.list_state.scroll_offset());
                match state.modals.open(config) {
                    Ok(id) => state.create = Some(CreateFieldState::new(id, form)),
                    Err(err) => {
                        log::error!("cannot open the create dialog: {err}");
                        state.status.error("Cannot open the create dialog");
                    }
                }
                Command::None
            }
            Msg::CloseCreate => {
                close_create(state);
                Command::None
            }
            Msg::FocusNext => {
                if let Some(create) = state.create.as_mut() {
                    create.shift_focus(1);
                }
                Command::None
            }
            Msg::FocusPrev => {
                if let Some(create) = state.create.as_mut() {
                    create.shift_focus(-1);
                }
                Command::None
            }
            Msg::FieldTypeKey(code) => {
                if let Some(create) = state.create.as_mut() {
                    if let SelectOutcome::Selected(index) = create
                        .field_type_select
                        .handle_key(code, FIELD_TYPE_OPTIONS.len())
                    {
                        create.form.dispatch(FormAction::Set(DraftEdit::FieldType(Some(
                            FIELD_TYPE_OPTIONS[index],
                        ))));
                    }
                }
                Command::None
            }
            Msg::LabelKey(code) => {
                if let Some(create) = state.create.as_mut() {
                    let value = create.form.draft().label.clone();
                    if let Some(next) = create.label_input.handle_key(code, &value, None) {
                        create.form.dispatch(FormAction::Set(DraftEdit::Label(next)));
                    }
                }
                Command::None
            }
            Msg::SelectTypeKey(code) => {
                if let Some(create) = state.create.as_mut() {
                    if let SelectOutcome::Selected(index) = create
                        .select_type_select
                        .handle_key(code, SELECT_TYPE_OPTIONS.len())
                    {
                        create.form.dispatch(FormAction::Set(DraftEdit::SelectType(Some(
                            SELECT_TYPE_OPTIONS[index],
                        ))));
                    }
                }
                Command::None
            }
            Msg::ToggleValueRequired => {
                if let Some(create) = state.create.as_mut() {
                    let flag = !create.form.draft().is_value_required;
                    create
                        .form
                        .dispatch(FormAction::Set(DraftEdit::ValueRequired(flag)));
                }
                Command::None
            }
            Msg::DefaultValueKey(code) => {
                if let Some(create) = state.create.as_mut() {
                    let value = create.form.draft().default_value.clone();
                    if let Some(next) = create.default_input.handle_key(code, &value, None) {
                        create
                            .form
                            .dispatch(FormAction::Set(DraftEdit::DefaultValue(next)));
                    }
                }
                Command::None
            }
            Msg::NewChoiceKey(code) => {
                if let Some(create) = state.create.as_mut() {
                    match code {
                        KeyCode::Enter => {
                            let value = create.new_choice.trim().to_string();
                            if !value.is_empty() {
                                create.form.add_option(value);
                                create.new_choice.clear();
                                create.choice_input = TextInputState::default();
                            }
                        }
                        _ => {
                            let current = create.new_choice.clone();
                            if let Some(next) =
                                create.choice_input.handle_key(code, &current, None)
                            {
                                create.new_choice = next;
                            }
                        }
                    }
                }
                Command::None
            }
            Msg::ChoicesKey(code) => {
                if let Some(create) = state.create.as_mut() {
                    let count = create.form.draft().options.len();
                    match code {
                        KeyCode::Up => {
                            create.choice_cursor = create.choice_cursor.saturating_sub(1);
                        }
                        KeyCode::Down if count > 0 => {
                            create.choice_cursor = (create.choice_cursor + 1).min(count - 1);
                        }
                        KeyCode::Backspace | KeyCode::Delete => {
                            let removed = create
                                .form
                                .draft()
                                .options
                                .get(create.choice_cursor)
                                .cloned();
                            if let Some(value) = removed {
                                create.form.remove_option(value);
                            }
                            let count = create.form.draft().options.len();
                            if count == 0 {
                                create.focus = CreateFocus::NewChoice;
                            } else {
                                create.choice_cursor = create.choice_cursor.min(count - 1);
                            }
                        }
                        _ => {}
                    }
                }
                Command::None
            }
            Msg::OrderKey(code) => {
                if let Some(create) = state.create.as_mut() {
                    if let SelectOutcome::Selected(index) =
                        create.order_select.handle_key(code, ORDER_OPTIONS.len())
                    {
                        create.form.dispatch(FormAction::Set(DraftEdit::Order(Some(
                            ORDER_OPTIONS[index],
                        ))));
                    }
                }
                Command::None
            }
            Msg::AddDefaultAsChoice => {
                if let Some(create) = state.create.as_mut() {
                    if create.can_add_default() {
                        let value = create.form.draft().default_value.clone();
                        create.form.add_option(value);
                    }
                }
                Command::None
            }
            Msg::Submit => {
                let Some(create) = state.create.as_mut() else {
                    return Command::None;
                };
                if create.submitting {
                    return Command::None;
                }
                create.submitting = true;
                state.status.info("Creating field…");
                let api = state.api.clone();
                let draft = create.form.draft().clone();
                Command::perform(
                    async move { submit(api.as_ref(), draft).await },
                    Msg::SubmitFinished,
                )
            }
            Msg::SubmitFinished(result) => {
                let Some(create) = state.create.as_mut() else {
                    // The dialog was closed while the request ran; the field
                    // (if created) shows up on the next refresh.
                    log::debug!("submission finished after the create dialog closed");
                    return Command::None;
                };
                create.submitting = false;
                match result {
                    Ok(success) => {
                        state
                            .status
                            .success(format!("Field '{}' created", success.created.label));
                        create.form.dispatch(FormAction::Reset);
                        if let Some(page) = success.refreshed {
                            state.partial_errors = page.errors;
                            state.list_state.clamp(page.fields.len());
                            state.fields = Resource::Success(page.fields);
                        }
                        close_create(state);
                    }
                    Err(error) => {
                        state.status.error(error.message());
                        // A missing field type is a toast, not a row error;
                        // the form has no row to highlight for it.
                        if let SubmitError::Validation(errors) = error {
                            if !errors.contains_key(&DraftField::FieldType) {
                                create.form.merge_errors(errors);
                            }
                        }
                    }
                }
                Command::None
            }
            Msg::Quit => Command::Quit,
        }
    }

    fn handle_key(state: &State, key: KeyEvent) -> Option<Msg> {
        let Some(create) = &state.create else {
            return match key.code {
                KeyCode::Up | KeyCode::Down | KeyCode::Home | KeyCode::End => {
                    Some(Msg::ListKey(key.code))
                }
                KeyCode::Enter | KeyCode::Char(' ') => Some(Msg::ToggleExpand),
                _ => None,
            };
        };

        // An open dropdown captures every key, including Esc.
        if create.field_type_select.is_open() {
            return Some(Msg::FieldTypeKey(key.code));
        }
        if create.select_type_select.is_open() {
            return Some(Msg::SelectTypeKey(key.code));
        }
        if create.order_select.is_open() {
            return Some(Msg::OrderKey(key.code));
        }

        match key.code {
            KeyCode::Tab => Some(Msg::FocusNext),
            KeyCode::BackTab => Some(Msg::FocusPrev),
            _ => match create.focus {
                CreateFocus::FieldType => Some(Msg::FieldTypeKey(key.code)),
                CreateFocus::Label => match key.code {
                    KeyCode::Enter => Some(Msg::FocusNext),
                    _ => Some(Msg::LabelKey(key.code)),
                },
                CreateFocus::SelectType => Some(Msg::SelectTypeKey(key.code)),
                CreateFocus::ValueRequired => {
                    matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
                        .then_some(Msg::ToggleValueRequired)
                }
                CreateFocus::DefaultValue => match key.code {
                    KeyCode::Enter => Some(Msg::AddDefaultAsChoice),
                    _ => Some(Msg::DefaultValueKey(key.code)),
                },
                CreateFocus::NewChoice => Some(Msg::NewChoiceKey(key.code)),
                CreateFocus::Choices => Some(Msg::ChoicesKey(key.code)),
                CreateFocus::Order => Some(Msg::OrderKey(key.code)),
                CreateFocus::Submit => matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
                    .then_some(Msg::Submit),
                CreateFocus::Cancel => matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
                    .then_some(Msg::CloseCreate),
            },
        }
    }

    fn subscriptions(state: &State) -> Vec<Subscription<Msg>> {
        if state.create.is_some() {
            return Vec::new();
        }
        vec![
            Subscription::keyboard(KeyCode::Char('n'), "New field", Msg::OpenCreate),
            Subscription::keyboard(KeyCode::Char('r'), "Refresh", Msg::Refresh),
            Subscription::keyboard(KeyCode::Char('q'), "Quit", Msg::Quit),
        ]
    }

    fn view(state: &mut State, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        view::draw(state, frame, area, theme);
    }

    fn view_modal(
        state: &mut State,
        entry: &ModalEntry<FieldsModal>,
        frame: &mut Frame<'_>,
        area: Rect,
        theme: &Theme,
    ) {
        match entry.kind {
            FieldsModal::CreateField => {
                if let Some(create) = &state.create {
                    modals::draw_create_field(create, frame, area, theme);
                }
            }
        }
    }

    fn modal_dismiss_msg(_state: &State, entry: &ModalEntry<FieldsModal>) -> Option<Msg> {
        match entry.kind {
            FieldsModal::CreateField => Some(Msg::CloseCreate),
        }
    }

    fn title() -> &'static str {
        "Field Builder"
    }
}

/// Close the create dialog and restore the list scroll snapshot taken when
/// it opened. Safe to call with no dialog open.
fn close_create(state: &mut State) {
    let Some(create) = state.create.take() else {
        return;
    };
    if create.submitting {
        log::debug!("create dialog closed with a submission in flight");
    }
    match state.modals.close(Some(&create.modal_id)) {
        Ok(Some(entry)) => state.list_state.set_scroll_offset(entry.restore_scroll),
        Ok(None) => {}
        Err(err) => log::error!("closing the create dialog: {err}"),
    }
}

async fn load_fields(api: Arc<dyn FieldsApi>) -> Result<FieldsPage, String> {
    api.list_fields().await.map_err(|err| format!("{err:#}"))
}
