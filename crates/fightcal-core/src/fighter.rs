//! Tracked fighters and the sports they compete in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A combat sport with its own upcoming-fight data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Ufc,
    Boxing,
}

impl Sport {
    /// All sports, in the order providers are queried.
    pub const ALL: [Sport; 2] = [Sport::Ufc, Sport::Boxing];

    /// Returns the lowercase tag used in config files and stored rosters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ufc => "ufc",
            Self::Boxing => "boxing",
        }
    }

    /// Returns a human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ufc => "UFC",
            Self::Boxing => "Boxing",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised sport tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sport: {0}")]
pub struct UnknownSport(pub String);

impl FromStr for Sport {
    type Err = UnknownSport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ufc" | "mma" => Ok(Self::Ufc),
            "boxing" => Ok(Self::Boxing),
            other => Err(UnknownSport(other.to_string())),
        }
    }
}

/// A fighter a user follows for fight notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackedFighter {
    /// Store identifier.
    pub id: u64,
    /// Fighter name as known to the data providers.
    pub name: String,
    /// The sport whose provider knows this fighter.
    pub sport: Sport,
}

impl TrackedFighter {
    /// Creates a tracked fighter.
    pub fn new(id: u64, name: impl Into<String>, sport: Sport) -> Self {
        Self {
            id,
            name: name.into(),
            sport,
        }
    }
}
