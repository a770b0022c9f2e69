use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use super::command::Command;
use super::modal::{ModalEntry, ModalHandle};
use super::subscription::Subscription;
use super::theme::Theme;

/// Elm-style application: pure-ish `update` over a message enum, with side
/// effects expressed as [`Command`]s and async results delivered back as
/// messages.
///
/// Key routing order in the runtime: [`App::handle_key`] (focused-widget
/// input) first, then [`App::subscriptions`] (global bindings), then modal
/// dismissal gestures resolved through [`App::modal_dismiss_msg`].
pub trait App {
    type State;
    type Msg: Send + 'static;
    /// What kind of dialog an entry on the modal stack renders.
    type Modal: Clone + 'static;
    type InitParams;

    fn init(params: Self::InitParams, modals: ModalHandle<Self::Modal>)
    -> (Self::State, Command<Self::Msg>);

    fn update(state: &mut Self::State, msg: Self::Msg) -> Command<Self::Msg>;

    /// Map a raw key event to a message for the currently focused widget.
    /// Returning `None` lets the event fall through to subscriptions and
    /// modal dismissal.
    fn handle_key(state: &Self::State, key: KeyEvent) -> Option<Self::Msg>;

    fn subscriptions(state: &Self::State) -> Vec<Subscription<Self::Msg>>;

    /// Render the base view.
    fn view(state: &mut Self::State, frame: &mut Frame<'_>, area: Rect, theme: &Theme);

    /// Render the content of one modal entry inside the dialog chrome the
    /// runtime has already drawn.
    fn view_modal(
        state: &mut Self::State,
        entry: &ModalEntry<Self::Modal>,
        frame: &mut Frame<'_>,
        area: Rect,
        theme: &Theme,
    );

    /// Message to dispatch when the user asks to dismiss `entry` via one of
    /// the configured closing gestures. The app closes the entry itself, so
    /// the stack keeps a single writer.
    fn modal_dismiss_msg(state: &Self::State, entry: &ModalEntry<Self::Modal>)
    -> Option<Self::Msg>;

    fn title() -> &'static str;
}
