use crate::catalog::{Operation, Resource};

/// Errors surfaced while resolving, building, or executing a gateway call.
///
/// Every variant is fatal for the item being processed; whether the batch
/// continues is decided by [`crate::executor::BatchPolicy`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The resource/operation pair has no catalog entry.
    #[error("unknown operation '{operation}' for resource '{resource}'")]
    UnknownOperation {
        resource: Resource,
        operation: Operation,
    },

    /// A required field was absent or empty.
    #[error("missing required field '{0}'")]
    MissingRequiredField(String),

    /// A field value could not be coerced to the kind the catalog declares.
    #[error("field '{field}' must be {expected}")]
    InvalidFieldValue {
        field: String,
        expected: &'static str,
    },

    /// Failure reported by the transport, passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Credential or configuration problem detected before any request is sent.
    #[error("config error: {0}")]
    Config(String),
}

/// Failures raised by a [`crate::transport::Transport`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built or sent (connection refused, timeout, TLS).
    #[error("gateway request failed: {0}")]
    Request(String),

    /// The gateway answered with a non-success status.
    #[error("gateway returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be read.
    #[error("failed to read gateway response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Request(e.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
