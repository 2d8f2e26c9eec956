//! Client error types.

use fightcal_providers::ProviderError;
use fightcal_sync::{ServiceError, SessionError, StoreError};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Provider or calendar setup error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Preview or sync failed as a whole.
    #[error("{0}")]
    Service(#[from] ServiceError),

    /// Roster store error.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// No usable session.
    #[error("authentication required: {0}")]
    AuthRequired(String),

    /// Invalid command input.
    #[error("invalid input: {0}")]
    Input(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SessionError> for ClientError {
    fn from(err: SessionError) -> Self {
        Self::Service(ServiceError::NotAuthenticated(err))
    }
}
