//! Error types for the sync service, roster store, and sessions.

use std::path::PathBuf;

use fightcal_core::Sport;
use fightcal_providers::ProviderError;
use thiserror::Error;

/// Result type for orchestrator operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type for roster store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that abort a preview or sync request.
///
/// Per-fight calendar failures are never reported here; they come back as
/// failed entries in the [`fightcal_core::SyncReport`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A sport's fight data provider failed.
    #[error("fight data for {sport} is unavailable: {source}")]
    ProviderUnavailable {
        sport: Sport,
        #[source]
        source: ProviderError,
    },

    /// The tracked fighter store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The caller has no valid session.
    #[error("not authenticated: {0}")]
    NotAuthenticated(#[from] SessionError),

    /// An explicit fight selection was empty.
    #[error("no fights provided to sync")]
    NothingToSync,

    /// The request was cancelled before it completed.
    #[error("operation cancelled")]
    Cancelled,
}

impl ServiceError {
    /// Creates a provider unavailable error.
    pub fn provider_unavailable(sport: Sport, source: ProviderError) -> Self {
        Self::ProviderUnavailable { sport, source }
    }
}

/// Errors from the roster store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access roster file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize roster: {0}")]
    Serialize(String),

    #[error("unknown user id {0}")]
    UnknownUser(u64),

    #[error("unknown fighter id {0}")]
    UnknownFighter(u64),

    /// The user already tracks this fighter.
    #[error("already tracking {fighter}")]
    AlreadyTracking { user_id: u64, fighter: String },

    #[error("invalid roster entry: {0}")]
    Invalid(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors issuing or resolving a session token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session signing secret is empty")]
    EmptySecret,

    #[error("session token is malformed")]
    Malformed,

    #[error("session token signature is invalid")]
    BadSignature,

    #[error("session token has expired")]
    Expired,

    #[error("unsupported session token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("failed to encode session token: {0}")]
    Encode(String),
}
