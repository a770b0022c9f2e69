//! The field-creation form: a pure reducer over the draft, a controller that
//! layers draft persistence and error clearing on top, and the submission
//! pipeline that turns a valid draft into a create request.

pub mod controller;
pub mod kind;
pub mod reducer;
pub mod submit;

pub use controller::FormController;
pub use kind::FieldKindSpec;
pub use reducer::{
    DraftEdit, DraftField, FieldDraft, FormAction, FormState, MAX_OPTIONS, ValidationErrors,
    reduce,
};
pub use submit::{SubmitError, SubmitSuccess, required_errors, submit};
