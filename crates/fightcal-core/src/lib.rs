//! Core types: fighters, fight events, sync results, time parsing

pub mod event;
pub mod fighter;
pub mod sync;
pub mod time;
pub mod tracing;

pub use event::{EventBuildError, FightEvent};
pub use fighter::{Sport, TrackedFighter, UnknownSport};
pub use sync::{SyncOutcome, SyncReport, SyncResult};
pub use time::{FIGHT_DURATION_MINUTES, fight_duration, parse_fight_date};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
