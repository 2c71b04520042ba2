//! Prediction table validation

mod schema;

pub use schema::SchemaValidator;
