//! Error types for SpaceFleet core.

use std::{error::Error, fmt};

/// Error type for SpaceFleet core operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FleetError {
    /// The request was malformed or a field failed validation.
    BadRequest(String),
    /// No ship exists with the given identifier.
    NotFound(i64),
    /// The record store failed to complete an operation.
    Storage(String),
}

impl FleetError {
    /// Build a validation error with a message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Build a storage error with a message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "bad request: {message}"),
            Self::NotFound(id) => write!(f, "ship {id} not found"),
            Self::Storage(message) => write!(f, "storage error: {message}"),
        }
    }
}

impl Error for FleetError {}

/// Convenience result type for SpaceFleet core.
pub type Result<T> = std::result::Result<T, FleetError>;
