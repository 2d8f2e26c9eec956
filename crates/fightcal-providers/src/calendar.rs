//! CalendarService trait: the external calendar that fight events are written to.

use std::fmt;

use fightcal_core::FightEvent;

use crate::error::ProviderResult;
use crate::provider::BoxFuture;

/// A caller-supplied calendar access token.
///
/// Never persisted; `Debug` output is redacted so tokens stay out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for use in an Authorization header.
    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// An external calendar that fight events can be written to.
pub trait CalendarService: Send + Sync {
    /// Returns the name of this service (e.g. "google-calendar").
    fn name(&self) -> &str;

    /// Inserts `event` and returns the calendar's identifier for it.
    fn insert_event<'a>(
        &'a self,
        token: &'a AccessToken,
        event: &'a FightEvent,
    ) -> BoxFuture<'a, ProviderResult<String>>;

    /// Looks for an entry previously written for the same fight
    /// (same [`FightEvent::key`]) and returns its identifier.
    ///
    /// The default reports nothing found, which makes every sync an insert.
    fn find_event<'a>(
        &'a self,
        _token: &'a AccessToken,
        _event: &'a FightEvent,
    ) -> BoxFuture<'a, ProviderResult<Option<String>>> {
        Box::pin(async { Ok(None) })
    }
}
