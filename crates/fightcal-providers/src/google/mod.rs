//! Google Calendar as a fight sync target.
//!
//! Events are inserted with a private extended property carrying the fight's
//! content key, which is also what the existence check queries on.

mod client;
mod config;
mod service;

pub use client::{
    ApiEvent, ApiEventBody, ApiEventTime, ApiExtendedProperties, FIGHT_KEY_PROPERTY,
    GoogleCalendarClient,
};
pub use config::{CALENDAR_API_BASE, GoogleCalendarConfig};
pub use service::GoogleCalendarService;
