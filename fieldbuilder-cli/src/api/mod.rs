//! GraphQL API layer for the field backend.
//!
//! The backend owns the `Field` entities; this client only reads the full
//! list and requests creation of new fields. Queries and mutations are plain
//! POSTs of `{query, variables}` against a single endpoint.

pub mod client;
pub mod graphql;
pub mod models;
pub mod payload;

pub use client::{FieldsApi, FieldsClient};
pub use graphql::{GraphQlError, GraphQlRequest, GraphQlResponse};
pub use models::{Field, FieldType, FieldsPage, OrderType, SelectType};
pub use payload::{CreateFieldInput, build_create_input};
