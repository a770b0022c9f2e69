//! Per-field-type form strategy.
//!
//! Each `FieldType` registers what its form asks for and what submission
//! must check, so adding a field type is one new entry here instead of
//! branching scattered through the form and the validator.

use crate::api::models::FieldType;

pub struct FieldKindSpec {
    /// Sub-kind selector (single/multi) is part of this form and required.
    pub requires_select_type: bool,
    /// The form carries a choice list with add/remove affordances.
    pub has_options: bool,
    /// The form offers an order policy for the choice list.
    pub has_order: bool,
}

const SELECT_SPEC: FieldKindSpec = FieldKindSpec {
    requires_select_type: true,
    has_options: true,
    has_order: true,
};

const TEXT_SPEC: FieldKindSpec = FieldKindSpec {
    requires_select_type: false,
    has_options: false,
    has_order: false,
};

impl FieldType {
    pub fn spec(&self) -> &'static FieldKindSpec {
        match self {
            FieldType::Select => &SELECT_SPEC,
            FieldType::Text => &TEXT_SPEC,
        }
    }
}
