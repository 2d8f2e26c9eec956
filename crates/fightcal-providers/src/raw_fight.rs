//! Raw fight records as returned by the scraper services.
//!
//! Each sport's scraper answers an upcoming-fights query with a JSON object
//! keyed by fighter name:
//!
//! ```json
//! {"Jon Jones": {"fighters": ["Jon Jones", "Stipe Miocic"],
//!                "event": {"date": "2025-05-01T20:00:00Z", "location": "Las Vegas"}}}
//! ```
//!
//! Records are kept close to the wire form here and only turned into
//! [`FightEvent`](fightcal_core::FightEvent)s by [`crate::normalize`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upcoming fights keyed by the fighter name the provider matched.
pub type UpcomingFights = BTreeMap<String, RawFightRecord>;

/// One upcoming fight as reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFightRecord {
    /// Combatants in billing order.
    #[serde(default)]
    pub fighters: Vec<String>,
    /// The card the fight is on.
    pub event: RawFightCard,
}

/// Event-level details of a raw fight record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFightCard {
    /// Start of the card, in whatever form the provider emits.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Venue name, reported separately by some providers.
    #[serde(default)]
    pub venue: Option<String>,
    /// Card title (e.g. "UFC 300").
    #[serde(default)]
    pub title: Option<String>,
}

impl RawFightRecord {
    /// Creates a record with the given combatants, date and location.
    pub fn new(
        fighters: impl IntoIterator<Item = impl Into<String>>,
        date: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            fighters: fighters.into_iter().map(Into::into).collect(),
            event: RawFightCard {
                date: Some(date.into()),
                location: Some(location.into()),
                ..Default::default()
            },
        }
    }

    /// Returns the display location: venue and location joined, blanks skipped.
    pub fn display_location(&self) -> String {
        [self.event.venue.as_deref(), self.event.location.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parses a provider response body, dropping entries that do not match the
/// record shape instead of rejecting the whole response.
///
/// Returns `Err` only when the body is not a JSON object at all.
pub fn parse_upcoming_fights(body: &str) -> Result<UpcomingFights, serde_json::Error> {
    let entries: BTreeMap<String, serde_json::Value> = serde_json::from_str(body)?;

    let mut fights = UpcomingFights::new();
    for (fighter, value) in entries {
        match serde_json::from_value::<RawFightRecord>(value) {
            Ok(record) => {
                fights.insert(fighter, record);
            }
            Err(e) => warn!(fighter = %fighter, error = %e, "skipping malformed fight record"),
        }
    }
    Ok(fights)
}
