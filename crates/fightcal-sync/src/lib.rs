//! Fight aggregation and calendar synchronization for fightcal.
//!
//! - [`FightAggregator`] queries each sport's provider and merges the answers
//! - [`CalendarSyncEngine`] writes events to a calendar through a worker pool
//! - [`SyncOrchestrator`] exposes the preview and sync operations
//! - [`store`] and [`session`] hold the roster and session collaborators

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod orchestrator;
pub mod session;
pub mod store;

pub use aggregate::FightAggregator;
pub use config::SyncConfig;
pub use engine::CalendarSyncEngine;
pub use error::{
    ServiceError, ServiceResult, SessionError, SessionResult, StoreError, StoreResult,
};
pub use orchestrator::SyncOrchestrator;
pub use session::{DEFAULT_SESSION_TTL, HmacSessionAuthority, SessionAuthority, SessionClaims};
pub use store::{FileStore, MemoryStore, Roster, TrackedFighterStore, User};
