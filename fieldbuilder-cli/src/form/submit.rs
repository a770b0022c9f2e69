//! Submission pipeline: validate the draft, build the create payload, invoke
//! the remote mutation, and refresh the list before reporting completion.

use crate::api::client::FieldsApi;
use crate::api::models::FieldsPage;
use crate::api::payload::build_create_input;
use crate::api::Field;

use super::reducer::{DraftField, FieldDraft, ValidationErrors};

#[derive(Debug)]
pub enum SubmitError {
    /// Local validation failed; no request was made. The caller merges these
    /// over any pre-existing errors.
    Validation(ValidationErrors),
    /// The server rejected the creation; the draft stays intact for retry.
    Remote(String),
}

impl SubmitError {
    /// One-line message for the status line.
    pub fn message(&self) -> String {
        match self {
            SubmitError::Validation(errors) => {
                if errors.contains_key(&DraftField::FieldType) {
                    "Please select a field type".to_string()
                } else {
                    let missing: Vec<&str> =
                        errors.values().map(String::as_str).collect();
                    format!("Missing {}", missing.join(", "))
                }
            }
            SubmitError::Remote(message) => format!("Error creating field: {message}"),
        }
    }
}

#[derive(Debug)]
pub struct SubmitSuccess {
    pub created: Field,
    /// The refreshed list, fetched before the submission reports completion
    /// so the view is consistent with the new field by the time the modal
    /// closes. `None` only if the refetch itself failed after a successful
    /// create.
    pub refreshed: Option<FieldsPage>,
}

/// Required-field errors for a draft whose `field_type` is set.
pub fn required_errors(draft: &FieldDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if draft.label.is_empty() {
        errors.insert(DraftField::Label, "Label".to_string());
    }
    if let Some(field_type) = draft.field_type {
        if field_type.spec().requires_select_type && draft.select_type.is_none() {
            errors.insert(DraftField::SelectType, "Select Type".to_string());
        }
    }
    errors
}

/// Run the full pipeline. Validation failures abort before any network call.
pub async fn submit(api: &dyn FieldsApi, draft: FieldDraft) -> Result<SubmitSuccess, SubmitError> {
    let Some(field_type) = draft.field_type else {
        let mut errors = ValidationErrors::new();
        errors.insert(DraftField::FieldType, "Field Type".to_string());
        return Err(SubmitError::Validation(errors));
    };

    let errors = required_errors(&draft);
    if !errors.is_empty() {
        return Err(SubmitError::Validation(errors));
    }

    let input = build_create_input(&draft, field_type);
    let created = api
        .create_field(input)
        .await
        .map_err(|err| SubmitError::Remote(err.to_string()))?;
    log::info!("created field {} ({})", created.label, created.id);

    let refreshed = match api.list_fields().await {
        Ok(page) => Some(page),
        Err(err) => {
            log::warn!("field created but list refresh failed: {err:#}");
            None
        }
    };

    Ok(SubmitSuccess { created, refreshed })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::api::models::{FieldType, SelectType};
    use crate::api::payload::CreateFieldInput;

    #[derive(Default)]
    struct FakeApi {
        creates: AtomicUsize,
        lists: AtomicUsize,
        last_input: Mutex<Option<CreateFieldInput>>,
        fail_create: Option<String>,
    }

    impl FakeApi {
        fn rejecting(message: &str) -> Self {
            Self {
                fail_create: Some(message.to_string()),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl FieldsApi for FakeApi {
        async fn list_fields(&self) -> Result<FieldsPage> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            Ok(FieldsPage::default())
        }

        async fn create_field(&self, input: CreateFieldInput) -> Result<Field> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            if let Some(message) = &self.fail_create {
                return Err(anyhow!(message.clone()));
            }
            let field = Field {
                id: "field-1".into(),
                label: input.label.clone(),
                field_type: input.field_type,
                is_value_required: input.is_value_required.unwrap_or(false),
                default_value: input.default_value.clone(),
                options: input.options.clone(),
                order_type: input.order_type,
                select_type: input.select_type,
                placeholder: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            *self.last_input.lock().unwrap() = Some(input);
            Ok(field)
        }
    }

    fn valid_select_draft() -> FieldDraft {
        FieldDraft {
            field_type: Some(FieldType::Select),
            label: "Status".into(),
            select_type: Some(SelectType::SingleSelect),
            options: vec!["Open".into(), "Closed".into()],
            ..FieldDraft::default()
        }
    }

    #[tokio::test]
    async fn unset_field_type_never_reaches_the_network() {
        let api = FakeApi::default();
        let result = submit(&api, FieldDraft::default()).await;
        match result {
            Err(SubmitError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.contains_key(&DraftField::FieldType));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(api.creates.load(Ordering::SeqCst), 0);
        assert_eq!(api.lists.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn select_without_select_type_reports_exactly_one_error() {
        let api = FakeApi::default();
        let mut draft = valid_select_draft();
        draft.select_type = None;
        let result = submit(&api, draft).await;
        match result {
            Err(SubmitError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.contains_key(&DraftField::SelectType));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(api.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_label_blocks_submission() {
        let api = FakeApi::default();
        let mut draft = valid_select_draft();
        draft.label.clear();
        let result = submit(&api, draft).await;
        match result {
            Err(SubmitError::Validation(errors)) => {
                assert!(errors.contains_key(&DraftField::Label));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(api.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_sends_the_mapped_payload_and_refreshes_the_list() {
        let api = FakeApi::default();
        let success = submit(&api, valid_select_draft()).await.unwrap();
        assert!(success.refreshed.is_some());
        assert_eq!(api.lists.load(Ordering::SeqCst), 1);

        let input = api.last_input.lock().unwrap().clone().unwrap();
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "label": "Status",
                "type": "SELECT",
                "selectType": "SINGLE_SELECT",
                "options": ["Open", "Closed"],
            })
        );
    }

    #[tokio::test]
    async fn remote_rejection_surfaces_the_server_message() {
        let api = FakeApi::rejecting("label already taken");
        let result = submit(&api, valid_select_draft()).await;
        match result {
            Err(SubmitError::Remote(message)) => assert_eq!(message, "label already taken"),
            other => panic!("expected remote error, got {other:?}"),
        }
        assert_eq!(api.lists.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn validation_message_lists_missing_fields() {
        let mut errors = ValidationErrors::new();
        errors.insert(DraftField::Label, "Label".into());
        errors.insert(DraftField::SelectType, "Select Type".into());
        assert_eq!(
            SubmitError::Validation(errors).message(),
            "Missing Label, Select Type"
        );
    }
}
