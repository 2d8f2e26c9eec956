//! Fight data providers, event normalization, and calendar services for fightcal.
//!
//! - [`provider`]: the per-sport [`FightDataProvider`] trait and registry
//! - [`scraper`]: HTTP providers backed by a scraper service
//! - [`normalize`]: turns raw scraper records into [`fightcal_core::FightEvent`]s
//! - [`calendar`]: the [`CalendarService`] write target
//! - [`google`]: Google Calendar implementation

pub mod calendar;
pub mod error;
pub mod google;
mod http;
pub mod normalize;
pub mod provider;
pub mod raw_fight;
pub mod scraper;

pub use calendar::{AccessToken, CalendarService};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use google::{GoogleCalendarConfig, GoogleCalendarService};
pub use normalize::{build_fight_event, build_fight_events};
pub use provider::{BoxFuture, ErrorProvider, FightDataProvider, ProviderRegistry};
pub use raw_fight::{RawFightCard, RawFightRecord, UpcomingFights, parse_upcoming_fights};
pub use scraper::{DEFAULT_SCRAPER_BASE_URL, HttpFightProvider, ScraperConfig};
