use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::api::graphql::{GraphQlRequest, GraphQlResponse};
use crate::api::models::{Field, FieldsPage};
use crate::api::payload::CreateFieldInput;

const GET_FIELDS_LIST: &str = r#"
query GetFieldsList {
  fields {
    id
    label
    type
    isValueRequired
    defaultValue
    options
    orderType
    selectType
    placeholder
    createdAt
    updatedAt
  }
}
"#;

const CREATE_FIELD: &str = r#"
mutation CreateField($data: CreateFieldInput!) {
  createField(data: $data) {
    id
    label
    type
    isValueRequired
    defaultValue
    options
    orderType
    selectType
    placeholder
    createdAt
    updatedAt
  }
}
"#;

/// Remote operations the dashboard needs. The seam exists so the submission
/// pipeline and the app can be exercised against an in-memory fake.
#[async_trait]
pub trait FieldsApi: Send + Sync {
    /// Fetch the full field list. A partially failed request resolves to an
    /// `Ok` page carrying whatever data arrived plus the error messages;
    /// only a transport failure or an all-errors response is an `Err`.
    async fn list_fields(&self) -> Result<FieldsPage>;

    /// Request creation of a field, returning the created entity.
    async fn create_field(&self, input: CreateFieldInput) -> Result<Field>;
}

/// HTTP client against the GraphQL endpoint configured at startup.
#[derive(Debug, Clone)]
pub struct FieldsClient {
    http: reqwest::Client,
    endpoint: String,
}

impl FieldsClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn execute<T: for<'de> Deserialize<'de>>(
        &self,
        request: GraphQlRequest,
    ) -> Result<GraphQlResponse<T>> {
        log::debug!("POST {}", self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<GraphQlResponse<T>>().await?)
    }
}

#[derive(Debug, Deserialize)]
struct FieldsData {
    fields: Vec<Field>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateFieldData {
    create_field: Field,
}

#[async_trait]
impl FieldsApi for FieldsClient {
    async fn list_fields(&self) -> Result<FieldsPage> {
        let response: GraphQlResponse<FieldsData> =
            self.execute(GraphQlRequest::new(GET_FIELDS_LIST)).await?;
        let errors = response.error_messages();
        match response.data {
            Some(data) => {
                if !errors.is_empty() {
                    log::warn!("field list arrived partially: {}", errors.join("; "));
                }
                Ok(FieldsPage {
                    fields: data.fields,
                    errors,
                })
            }
            None => Err(anyhow!(
                errors
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| "empty response from server".to_string())
            )),
        }
    }

    async fn create_field(&self, input: CreateFieldInput) -> Result<Field> {
        let request = GraphQlRequest::with_variables(CREATE_FIELD, json!({ "data": input }));
        let response: GraphQlResponse<CreateFieldData> = self.execute(request).await?;
        if let Some(message) = response.first_error() {
            return Err(anyhow!(message.to_string()));
        }
        response
            .data
            .map(|data| data.create_field)
            .ok_or_else(|| anyhow!("server returned no field"))
    }
}
