pub mod fields;

pub use fields::FieldsApp;
