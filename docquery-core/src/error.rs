//! Error types and result types for query construction.
//!
//! Translating a request query never fails. The fallible edges are record
//! serialization and validation, and rendering a query for a specific backend.
//! Use [`DocQueryResult<T>`] as the return type for those operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors raised while building store queries.
#[derive(Error, Debug)]
pub enum DocQueryError {
    /// Serialization/deserialization error when converting between record formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The record violates its schema constraints.
    /// The first argument is the collection name, the second describes the violation.
    #[error("Invalid record in collection {0}: {1}")]
    InvalidRecord(String, String),
    /// A query could not be rendered for the target backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for query construction.
pub type DocQueryResult<T> = Result<T, DocQueryError>;

impl From<BsonError> for DocQueryError {
    fn from(err: BsonError) -> Self {
        DocQueryError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for DocQueryError {
    fn from(err: SerdeJsonError) -> Self {
        DocQueryError::Serialization(err.to_string())
    }
}
