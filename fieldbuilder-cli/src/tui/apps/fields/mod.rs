//! The field dashboard: list of existing fields plus the create-field dialog.

mod app;
mod modals;
mod state;
mod view;

pub use app::FieldsApp;
pub use state::{CreateFieldState, CreateFocus, FieldsModal, FieldsParams, Msg, State};
