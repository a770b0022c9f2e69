use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Select,
    Text,
}

impl FieldType {
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Select => "Select",
            FieldType::Text => "Text",
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldType::Select => "SELECT",
            FieldType::Text => "TEXT",
        }
    }
}

/// Sub-kind of a SELECT field: single-choice or multi-choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectType {
    SingleSelect,
    MultiSelect,
}

impl SelectType {
    pub fn label(&self) -> &'static str {
        match self {
            SelectType::SingleSelect => "Select",
            SelectType::MultiSelect => "Multi-select",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SelectType::SingleSelect => "single select",
            SelectType::MultiSelect => "multi select",
        }
    }
}

/// Sort policy applied to a SELECT field's choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Alphabetical,
    ReverseAlphabetical,
}

impl OrderType {
    pub fn label(&self) -> &'static str {
        match self {
            OrderType::Alphabetical => "Alphabetical",
            OrderType::ReverseAlphabetical => "Reverse Alphabetical",
        }
    }
}

/// A persisted, backend-owned field definition. The client never mutates
/// these directly, it only requests creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub is_value_required: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub select_type: Option<SelectType>,
    #[serde(default)]
    pub placeholder: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of the list query. A partially failed request still carries any
/// fields the server managed to resolve, alongside the error messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldsPage {
    pub fields: Vec<Field>,
    pub errors: Vec<String>,
}

impl FieldsPage {
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}
