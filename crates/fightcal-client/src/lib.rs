//! fightcal command-line client.
//!
//! Wires configuration, the roster store, sessions, scraper providers and
//! Google Calendar into the `fightcal` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secret;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
