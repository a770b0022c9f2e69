//! Minimal GraphQL wire format: a request is `{query, variables}`, a
//! response is `{data, errors}` where both halves may be present at once
//! (partial result).

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: Value,
}

impl GraphQlRequest {
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            variables: Value::Object(Default::default()),
        }
    }

    pub fn with_variables(query: &'static str, variables: Value) -> Self {
        Self { query, variables }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// First server-reported error message, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}
