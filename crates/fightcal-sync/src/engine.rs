//! CalendarSyncEngine: pushes fight events to a calendar through a bounded
//! pool of workers, one result per input event.

use std::collections::HashMap;
use std::sync::Arc;

use fightcal_core::{FightEvent, SyncOutcome, SyncReport, SyncResult};
use fightcal_providers::{AccessToken, CalendarService};
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::SyncConfig;

const CANCELLED_REASON: &str = "cancelled before the fight was synced";
const WORKER_LOST_REASON: &str = "sync worker stopped before finishing this fight";

type Job = (usize, FightEvent);

/// Ensures each fight event exists on the target calendar.
///
/// Events are processed independently: one failed insert never stops the
/// others, and the returned report always has one result per input event,
/// in input order.
#[derive(Clone)]
pub struct CalendarSyncEngine {
    calendar: Arc<dyn CalendarService>,
    config: SyncConfig,
}

impl CalendarSyncEngine {
    pub fn new(calendar: Arc<dyn CalendarService>, config: SyncConfig) -> Self {
        Self { calendar, config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Syncs `events` using the caller's `token`.
    ///
    /// When `skip_existing` is set, an event whose content key is already on
    /// the calendar is reported as a success without inserting, and repeats
    /// of the same fight within `events` share the first copy's outcome.
    /// Events still pending when `cancel` fires are reported as failures.
    #[instrument(skip_all, fields(calendar = self.calendar.name(), events = events.len()))]
    pub async fn sync(
        &self,
        token: &AccessToken,
        events: Vec<FightEvent>,
        cancel: &CancellationToken,
    ) -> SyncReport {
        if events.is_empty() {
            return SyncReport::default();
        }

        let total = events.len();
        let (jobs, repeats) = self.plan(&events);
        let mut outcomes = self.run_workers(token, jobs, cancel).await;

        for (index, first) in repeats {
            let outcome = match outcomes.get(&first) {
                Some(SyncOutcome::Success { event_id, .. }) => SyncOutcome::existing(event_id.clone()),
                Some(other) => other.clone(),
                None => SyncOutcome::failure(WORKER_LOST_REASON),
            };
            outcomes.insert(index, outcome);
        }

        let results: Vec<SyncResult> = events
            .into_iter()
            .enumerate()
            .map(|(index, event)| {
                let outcome = outcomes.remove(&index).unwrap_or_else(|| {
                    warn!(fighter = %event.fighter_name, "no outcome recorded for fight");
                    SyncOutcome::failure(WORKER_LOST_REASON)
                });
                SyncResult::new(event, outcome)
            })
            .collect();

        let report = SyncReport::new(results);
        info!(
            total,
            succeeded = report.succeeded(),
            created = report.created(),
            failed = report.failed(),
            "calendar sync finished"
        );
        report
    }

    /// Splits events into jobs to dispatch and in-batch repeats, as
    /// `(repeat index, first index)` pairs.
    fn plan(&self, events: &[FightEvent]) -> (Vec<Job>, Vec<(usize, usize)>) {
        let mut jobs = Vec::with_capacity(events.len());
        let mut repeats = Vec::new();
        let mut first_by_key: HashMap<String, usize> = HashMap::new();

        for (index, event) in events.iter().enumerate() {
            if self.config.skip_existing {
                if let Some(&first) = first_by_key.get(&event.key()) {
                    debug!(fighter = %event.fighter_name, "fight repeated in batch");
                    repeats.push((index, first));
                    continue;
                }
                first_by_key.insert(event.key(), index);
            }
            jobs.push((index, event.clone()));
        }
        (jobs, repeats)
    }

    /// Feeds `jobs` to a fixed pool of workers and collects their outcomes by index.
    async fn run_workers(
        &self,
        token: &AccessToken,
        jobs: Vec<Job>,
        cancel: &CancellationToken,
    ) -> HashMap<usize, SyncOutcome> {
        let worker_count = self.config.workers_for(jobs.len());
        let (job_tx, job_rx) = mpsc::channel::<Job>(jobs.len().max(1));
        let (result_tx, mut result_rx) = mpsc::channel::<(usize, SyncOutcome)>(jobs.len().max(1));

        for job in jobs {
            if job_tx.send(job).await.is_err() {
                break;
            }
        }
        drop(job_tx);

        let job_rx = Arc::new(Mutex::new(job_rx));
        let mut handles = Vec::with_capacity(worker_count);
        for worker in 0..worker_count {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let calendar = Arc::clone(&self.calendar);
            let token = token.clone();
            let cancel = cancel.clone();
            let skip_existing = self.config.skip_existing;

            handles.push(tokio::spawn(async move {
                loop {
                    let next = job_rx.lock().await.recv().await;
                    let Some((index, event)) = next else {
                        break;
                    };
                    let outcome =
                        sync_one(calendar.as_ref(), &token, &event, skip_existing, &cancel).await;
                    if result_tx.send((index, outcome)).await.is_err() {
                        break;
                    }
                }
                debug!(worker, "sync worker done");
            }));
        }
        drop(result_tx);

        let mut outcomes = HashMap::new();
        while let Some((index, outcome)) = result_rx.recv().await {
            outcomes.insert(index, outcome);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "sync worker failed");
            }
        }
        outcomes
    }
}

impl std::fmt::Debug for CalendarSyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarSyncEngine")
            .field("calendar", &self.calendar.name())
            .field("config", &self.config)
            .finish()
    }
}

/// Syncs a single event. Every error becomes a failure outcome.
async fn sync_one(
    calendar: &dyn CalendarService,
    token: &AccessToken,
    event: &FightEvent,
    skip_existing: bool,
    cancel: &CancellationToken,
) -> SyncOutcome {
    if cancel.is_cancelled() {
        return SyncOutcome::failure(CANCELLED_REASON);
    }
    if let Err(e) = event.validate() {
        return SyncOutcome::failure(e.to_string());
    }

    if skip_existing {
        let found = tokio::select! {
            biased;
            _ = cancel.cancelled() => return SyncOutcome::failure(CANCELLED_REASON),
            found = calendar.find_event(token, event) => found,
        };
        match found {
            Ok(Some(event_id)) => {
                debug!(fighter = %event.fighter_name, %event_id, "already on calendar");
                return SyncOutcome::existing(event_id);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(
                    fighter = %event.fighter_name,
                    error = %e,
                    retryable = e.is_retryable(),
                    "existing event lookup failed"
                );
                return SyncOutcome::failure(e.reason());
            }
        }
    }

    let inserted = tokio::select! {
        biased;
        _ = cancel.cancelled() => return SyncOutcome::failure(CANCELLED_REASON),
        inserted = calendar.insert_event(token, event) => inserted,
    };
    match inserted {
        Ok(event_id) => {
            debug!(fighter = %event.fighter_name, %event_id, "inserted fight");
            SyncOutcome::created(event_id)
        }
        Err(e) => {
            warn!(
                fighter = %event.fighter_name,
                error = %e,
                retryable = e.is_retryable(),
                "insert failed"
            );
            SyncOutcome::failure(e.reason())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fightcal_providers::{BoxFuture, ProviderError, ProviderResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Inserts everything, numbering ids in call order.
    #[derive(Default)]
    struct CountingCalendar {
        inserts: AtomicUsize,
    }

    impl CalendarService for CountingCalendar {
        fn name(&self) -> &str {
            "counting"
        }

        fn insert_event<'a>(
            &'a self,
            _token: &'a AccessToken,
            _event: &'a FightEvent,
        ) -> BoxFuture<'a, ProviderResult<String>> {
            let n = self.inserts.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { Ok(format!("evt-{}", n)) })
        }
    }

    /// Rejects every call.
    struct RejectingCalendar;

    impl CalendarService for RejectingCalendar {
        fn name(&self) -> &str {
            "rejecting"
        }

        fn insert_event<'a>(
            &'a self,
            _token: &'a AccessToken,
            _event: &'a FightEvent,
        ) -> BoxFuture<'a, ProviderResult<String>> {
            Box::pin(async { Err(ProviderError::http_status(401, "Invalid Credentials")) })
        }
    }

    fn event(name: &str, day: u32) -> FightEvent {
        let start = Utc.with_ymd_and_hms(2025, 5, day, 20, 0, 0).unwrap();
        FightEvent::new(name, [name, "Opponent"], start, "Vegas").unwrap()
    }

    #[tokio::test]
    async fn empty_batch_is_empty_report() {
        let engine = CalendarSyncEngine::new(Arc::new(CountingCalendar::default()), SyncConfig::new());
        let report = engine
            .sync(&AccessToken::new("t"), Vec::new(), &CancellationToken::new())
            .await;
        assert_eq!(report.total(), 0);
    }

    #[tokio::test]
    async fn results_follow_input_order() {
        let engine = CalendarSyncEngine::new(
            Arc::new(CountingCalendar::default()),
            SyncConfig::new().with_workers(3),
        );
        let events: Vec<_> = (1..=7).map(|d| event(&format!("F{}", d), d)).collect();
        let report = engine
            .sync(&AccessToken::new("t"), events.clone(), &CancellationToken::new())
            .await;

        assert_eq!(report.total(), 7);
        assert_eq!(report.created(), 7);
        let returned: Vec<_> = report.results.iter().map(|r| r.event.clone()).collect();
        assert_eq!(returned, events);
    }

    #[tokio::test]
    async fn repeated_fight_inserted_once() {
        let calendar = Arc::new(CountingCalendar::default());
        let engine = CalendarSyncEngine::new(calendar.clone(), SyncConfig::new());
        let report = engine
            .sync(
                &AccessToken::new("t"),
                vec![event("A", 1), event("A", 1)],
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(calendar.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.created(), 1);
        assert_eq!(report.results[0].event_id(), report.results[1].event_id());
    }

    #[tokio::test]
    async fn repeats_inserted_when_check_disabled() {
        let calendar = Arc::new(CountingCalendar::default());
        let engine =
            CalendarSyncEngine::new(calendar.clone(), SyncConfig::new().with_skip_existing(false));
        let report = engine
            .sync(
                &AccessToken::new("t"),
                vec![event("A", 1), event("A", 1)],
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(calendar.inserts.load(Ordering::SeqCst), 2);
        assert_eq!(report.created(), 2);
    }

    #[tokio::test]
    async fn rejected_insert_is_failure_with_reason() {
        let engine = CalendarSyncEngine::new(Arc::new(RejectingCalendar), SyncConfig::new());
        let report = engine
            .sync(
                &AccessToken::new("bad"),
                vec![event("A", 1), event("B", 2)],
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(report.failed(), 2);
        let reason = report.results[0].failure_reason().unwrap();
        assert!(reason.contains("invalid or expired"));
    }

    #[tokio::test]
    async fn invalid_event_fails_alone() {
        let mut broken = event("B", 2);
        broken.opponents.clear();

        let engine = CalendarSyncEngine::new(Arc::new(CountingCalendar::default()), SyncConfig::new());
        let report = engine
            .sync(
                &AccessToken::new("t"),
                vec![event("A", 1), broken],
                &CancellationToken::new(),
            )
            .await;

        assert!(report.results[0].is_success());
        assert!(!report.results[1].is_success());
    }

    #[tokio::test]
    async fn stretched_selection_fails_alone() {
        let calendar = Arc::new(CountingCalendar::default());
        let mut stretched = event("B", 2);
        stretched.end = stretched.start + chrono::Duration::hours(9);
        let mut blank = event("C", 3);
        blank.opponents.push("  ".to_string());

        let engine = CalendarSyncEngine::new(calendar.clone(), SyncConfig::new());
        let report = engine
            .sync(
                &AccessToken::new("t"),
                vec![event("A", 1), stretched, blank, event("D", 4)],
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(report.total(), 4);
        assert_eq!(report.created(), 2);
        assert_eq!(calendar.inserts.load(Ordering::SeqCst), 2);
        assert!(report.results[0].is_success());
        assert!(
            report.results[1]
                .failure_reason()
                .unwrap()
                .contains("120 minutes")
        );
        assert!(
            report.results[2]
                .failure_reason()
                .unwrap()
                .contains("blank combatant")
        );
        assert!(report.results[3].is_success());
    }

    #[tokio::test]
    async fn cancelled_before_start_fails_everything() {
        let calendar = Arc::new(CountingCalendar::default());
        let engine = CalendarSyncEngine::new(calendar.clone(), SyncConfig::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = engine
            .sync(&AccessToken::new("t"), vec![event("A", 1), event("B", 2)], &cancel)
            .await;

        assert_eq!(report.total(), 2);
        assert_eq!(report.failed(), 2);
        assert_eq!(calendar.inserts.load(Ordering::SeqCst), 0);
    }
}
