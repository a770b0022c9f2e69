//! Create-field payload construction.
//!
//! The backend rejects explicit nulls for optional attributes, so every
//! optional key is omitted from the serialized input instead of being sent
//! empty. `build_create_input` is the single place that decides which keys a
//! draft contributes.

use serde::Serialize;

use crate::api::models::{FieldType, OrderType, SelectType};
use crate::form::FieldDraft;

/// Variables for the `CreateField` mutation. Optional keys are skipped
/// entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldInput {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_value_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_type: Option<SelectType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
}

/// Map a validated draft to the mutation input.
///
/// Callers must have validated the draft first; a missing `field_type` here
/// is a programming error, so the function is only reachable behind
/// validation and takes the resolved type explicitly.
pub fn build_create_input(draft: &FieldDraft, field_type: FieldType) -> CreateFieldInput {
    CreateFieldInput {
        label: draft.label.clone(),
        field_type,
        is_value_required: draft.is_value_required.then_some(true),
        default_value: (!draft.default_value.is_empty()).then(|| draft.default_value.clone()),
        select_type: draft.select_type,
        options: (!draft.options.is_empty()).then(|| draft.options.clone()),
        order_type: draft.order,
    }
}
