//! SyncOrchestrator: the preview and sync entry points.

use std::sync::Arc;

use fightcal_core::{FightEvent, SyncReport};
use fightcal_providers::{AccessToken, CalendarService, ProviderRegistry, build_fight_events};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::aggregate::FightAggregator;
use crate::config::SyncConfig;
use crate::engine::CalendarSyncEngine;
use crate::error::{ServiceError, ServiceResult};
use crate::store::TrackedFighterStore;

/// Ties the store, aggregator, event builder and sync engine together.
///
/// Callers resolve the session to a user id before calling in.
pub struct SyncOrchestrator {
    store: Arc<dyn TrackedFighterStore>,
    aggregator: FightAggregator,
    engine: CalendarSyncEngine,
}

impl SyncOrchestrator {
    pub fn new(
        store: Arc<dyn TrackedFighterStore>,
        registry: ProviderRegistry,
        calendar: Arc<dyn CalendarService>,
        config: SyncConfig,
    ) -> Self {
        Self {
            store,
            aggregator: FightAggregator::new(registry),
            engine: CalendarSyncEngine::new(calendar, config),
        }
    }

    pub fn aggregator(&self) -> &FightAggregator {
        &self.aggregator
    }

    pub fn engine(&self) -> &CalendarSyncEngine {
        &self.engine
    }

    /// Returns the upcoming fights for `user_id`'s tracked fighters.
    ///
    /// Read-only: nothing is written to the calendar. Records whose date
    /// cannot be parsed are dropped. Events come back ordered by fighter name.
    #[instrument(skip(self, cancel))]
    pub async fn preview(
        &self,
        user_id: u64,
        cancel: &CancellationToken,
    ) -> ServiceResult<Vec<FightEvent>> {
        let fighters = self.store.list_for_user(user_id).await?;
        let fights = self.aggregator.aggregate(&fighters, cancel).await?;
        let events = build_fight_events(&fights);
        info!(tracked = fighters.len(), events = events.len(), "built preview");
        Ok(events)
    }

    /// Pushes fights to the calendar with the caller's `token`.
    ///
    /// With `fights` set to `None`, everything [`preview`](Self::preview)
    /// would return is synced. With an explicit selection only those events
    /// are synced, and an empty selection is rejected.
    ///
    /// # Errors
    ///
    /// Fails only when the event list cannot be produced (store or provider
    /// failure, empty selection, cancellation before any insert). Per-fight
    /// failures are reported in the returned [`SyncReport`].
    #[instrument(skip(self, token, fights, cancel), fields(selected = fights.as_ref().map(Vec::len)))]
    pub async fn sync(
        &self,
        user_id: u64,
        token: &AccessToken,
        fights: Option<Vec<FightEvent>>,
        cancel: &CancellationToken,
    ) -> ServiceResult<SyncReport> {
        let events = match fights {
            Some(selected) if selected.is_empty() => return Err(ServiceError::NothingToSync),
            Some(selected) => selected,
            None => self.preview(user_id, cancel).await?,
        };

        if cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }

        let report = self.engine.sync(token, events, cancel).await;
        info!(summary = %report.summary(), "sync complete");
        Ok(report)
    }
}

impl std::fmt::Debug for SyncOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncOrchestrator")
            .field("aggregator", &self.aggregator)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
