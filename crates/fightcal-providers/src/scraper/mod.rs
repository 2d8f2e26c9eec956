//! Scraper-backed fight data providers.
//!
//! The scraper service exposes one `POST .../upcoming-fights` endpoint per
//! sport, taking `{"fighters": [...]}` and answering with the next fight for
//! each fighter it recognises.

mod client;
mod config;

pub use client::HttpFightProvider;
pub use config::{DEFAULT_SCRAPER_BASE_URL, ScraperConfig};
