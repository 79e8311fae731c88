//! # Client Errors
//!
//! The error taxonomy for remote calls. Centralizing it here keeps every
//! implementation (REST, mock) and every caller speaking the same language.
//!
//! The variants are deliberately coarse:
//! - [`ClientError::NotFound`] — the remote reports the record absent.
//! - [`ClientError::Remote`] — any other non-success HTTP status.
//! - [`ClientError::Network`] — transport-level failure, the request never got
//!   a response.
//! - [`ClientError::Decode`] — the remote answered with a success status but
//!   the body could not be decoded. Named separately so it is never mistaken
//!   for a transport failure.

use thiserror::Error;

/// Errors produced by a [`ResourceClient`](crate::client::ResourceClient).
///
/// `Clone + PartialEq` so tests can assert on exact outcomes and so callers
/// can carry a failure around in events without re-boxing it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The remote reports the requested record does not exist.
    #[error("Resource not found")]
    NotFound,

    /// The remote responded with a non-success status.
    #[error("Remote returned status {status}")]
    Remote { status: u16 },

    /// The request never got a response (connect failure, timeout, ...).
    #[error("Network failure: {0}")]
    Network(String),

    /// A success response carried a body we could not decode.
    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Maps a transport error into the taxonomy, preserving the message.
    pub fn network(err: impl std::fmt::Display) -> Self {
        ClientError::Network(err.to_string())
    }
}
