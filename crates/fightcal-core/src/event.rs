//! Normalized fight events.
//!
//! A [`FightEvent`] is the sport-agnostic, calendar-ready form of an upcoming
//! fight. It is built per request from provider data and never stored
//! locally; the external calendar is the only place synced events live.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::time::{FIGHT_DURATION_MINUTES, fight_duration};

/// Reasons a fight cannot be turned into a [`FightEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventBuildError {
    /// The record listed no combatants.
    #[error("fight for {fighter} lists no combatants")]
    NoCombatants { fighter: String },

    /// The provider date could not be parsed.
    #[error("fight for {fighter} has an unparsable date: {value:?}")]
    InvalidDate { fighter: String, value: String },

    /// A combatant name is blank.
    #[error("fight for {fighter} has a blank combatant name")]
    BlankCombatant { fighter: String },

    /// The event does not span exactly the fixed fight duration.
    #[error("fight for {fighter} must run {minutes} minutes from its start")]
    InvalidTimeRange { fighter: String, minutes: i64 },
}

/// A normalized upcoming fight, ready to be written to a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FightEvent {
    /// The tracked fighter whose lookup produced this event.
    pub fighter_name: String,
    /// Combatants in billing order.
    pub opponents: Vec<String>,
    /// Scheduled start.
    pub start: DateTime<Utc>,
    /// Scheduled end, always `start` plus the fixed fight duration.
    pub end: DateTime<Utc>,
    /// Venue or city, possibly empty.
    #[serde(default)]
    pub location: String,
    /// Free-text description naming the tracked fighter.
    #[serde(default)]
    pub description: String,
}

impl FightEvent {
    /// Builds an event for `fighter_name` from the card's combatants and start time.
    ///
    /// Blank combatant names are dropped; an empty list is rejected.
    pub fn new(
        fighter_name: impl Into<String>,
        opponents: impl IntoIterator<Item = impl AsRef<str>>,
        start: DateTime<Utc>,
        location: impl Into<String>,
    ) -> Result<Self, EventBuildError> {
        let fighter_name = fighter_name.into();
        let opponents: Vec<String> = opponents
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        if opponents.is_empty() {
            return Err(EventBuildError::NoCombatants {
                fighter: fighter_name,
            });
        }

        let description = format!("Tracked fighter: {}", fighter_name);

        Ok(Self {
            end: start + fight_duration(),
            fighter_name,
            opponents,
            start,
            location: location.into().trim().to_string(),
            description,
        })
    }

    /// Returns the calendar title: combatants joined with `" vs "`.
    pub fn summary(&self) -> String {
        self.opponents.join(" vs ")
    }

    /// Checks the invariants of an event received from outside the builder.
    ///
    /// Rejects events with no combatants or a blank name, and events whose
    /// end is not exactly one fight duration after the start.
    pub fn validate(&self) -> Result<(), EventBuildError> {
        let fighter = || self.fighter_name.clone();
        if self.opponents.is_empty() {
            return Err(EventBuildError::NoCombatants { fighter: fighter() });
        }
        if self.opponents.iter().any(|name| name.trim().is_empty()) {
            return Err(EventBuildError::BlankCombatant { fighter: fighter() });
        }
        if self.end - self.start != fight_duration() {
            return Err(EventBuildError::InvalidTimeRange {
                fighter: fighter(),
                minutes: FIGHT_DURATION_MINUTES,
            });
        }
        Ok(())
    }

    /// Returns a stable content key for duplicate detection.
    ///
    /// Derived from the tracked fighter, the opponent set (order and case
    /// insensitive) and the start time, so re-deriving the same fight yields
    /// the same key.
    pub fn key(&self) -> String {
        let mut opponents: Vec<String> = self
            .opponents
            .iter()
            .map(|name| name.trim().to_lowercase())
            .collect();
        opponents.sort();

        let mut hasher = Sha256::new();
        hasher.update(self.fighter_name.trim().to_lowercase().as_bytes());
        hasher.update(b"\n");
        hasher.update(opponents.join("|").as_bytes());
        hasher.update(b"\n");
        hasher.update(self.start.timestamp().to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
