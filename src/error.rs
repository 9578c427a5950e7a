//! Error types for requester operations.

use thiserror::Error;

use crate::client::ApiError;
use crate::response::{FieldKind, Response};

/// Result type for requester operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Raised when a reply lacks a field the requester expects.
///
/// Carries the offending [`Response`] so callers can inspect the raw reply.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct CommunicationError {
    message: String,
    response: Box<Response>,
}

impl CommunicationError {
    pub fn new(message: impl Into<String>, response: Response) -> Self {
        Self {
            message: message.into(),
            response: Box::new(response),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn response(&self) -> &Response {
        &self.response
    }
}

/// Errors surfaced by the requester.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Communication(#[from] CommunicationError),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("amount {0} is not a whole number of cents")]
    InvalidAmount(f64),

    #[error("{0} is not stored")]
    NotStored(String),

    #[error("value at {path} is not a valid {kind}: {value:?}")]
    InvalidField {
        path: String,
        kind: FieldKind,
        value: String,
    },

    /// Marketplace or transport failure, passed through untouched.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// The response attached to a communication failure, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Communication(err) => Some(err.response()),
            _ => None,
        }
    }
}
