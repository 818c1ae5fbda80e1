//! Error types for the todo-list client.
//!
//! # Design
//! `ApiError` covers everything that can go wrong with a single round-trip.
//! `ClientError` adds the rejections the client makes before any request is
//! issued (an empty draft, an operation already in flight, an id that is
//! not in the list) and outcomes delivered for an operation never begun.

use std::fmt;

use crate::loading::Operation;

/// Errors produced while building requests or interpreting responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),

    /// No response arrived (connection refused, reset, DNS failure...).
    Transport(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::Transport(msg) => write!(f, "request failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors returned by `TodoListClient` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Submission attempted with an empty draft title.
    EmptyTitle,

    /// The same operation is already in flight.
    Busy(Operation),

    /// An outcome arrived for an operation that is not in flight.
    NotInFlight(Operation),

    /// No item with this id is in the list.
    UnknownItem(String),

    /// The round-trip failed; local data is unchanged.
    Api(ApiError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::EmptyTitle => write!(f, "title is empty"),
            ClientError::Busy(op) => write!(f, "{op} is already in progress"),
            ClientError::NotInFlight(op) => write!(f, "{op} is not in progress"),
            ClientError::UnknownItem(id) => write!(f, "no item with id {id}"),
            ClientError::Api(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        ClientError::Api(err)
    }
}
