//! Per-event sync outcomes and the batch report built from them.

use serde::{Deserialize, Serialize};

use crate::event::FightEvent;

/// What happened when one event was pushed to the external calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The event is on the calendar.
    ///
    /// `created` is false when an entry with the same content key already
    /// existed and no insert was made.
    Success { event_id: String, created: bool },
    /// The event could not be written.
    Failure { reason: String },
}

impl SyncOutcome {
    /// Outcome for a freshly inserted event.
    pub fn created(event_id: impl Into<String>) -> Self {
        Self::Success {
            event_id: event_id.into(),
            created: true,
        }
    }

    /// Outcome for an event found already present.
    pub fn existing(event_id: impl Into<String>) -> Self {
        Self::Success {
            event_id: event_id.into(),
            created: false,
        }
    }

    /// Outcome for a failed event.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One attempted event and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub event: FightEvent,
    pub outcome: SyncOutcome,
}

impl SyncResult {
    pub fn new(event: FightEvent, outcome: SyncOutcome) -> Self {
        Self { event, outcome }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// External event id, when the sync succeeded.
    pub fn event_id(&self) -> Option<&str> {
        match &self.outcome {
            SyncOutcome::Success { event_id, .. } => Some(event_id),
            SyncOutcome::Failure { .. } => None,
        }
    }

    /// Failure reason, when the sync failed.
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            SyncOutcome::Failure { reason } => Some(reason),
            SyncOutcome::Success { .. } => None,
        }
    }
}

/// The results of one sync request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub results: Vec<SyncResult>,
}

impl SyncReport {
    pub fn new(results: Vec<SyncResult>) -> Self {
        Self { results }
    }

    /// Number of events attempted.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of events now present on the calendar.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of events inserted by this request.
    pub fn created(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, SyncOutcome::Success { created: true, .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Iterates over the failed results.
    pub fn failures(&self) -> impl Iterator<Item = &SyncResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// User-facing one-line summary, e.g. `synced 2 of 3 fights`.
    pub fn summary(&self) -> String {
        let noun = if self.total() == 1 { "fight" } else { "fights" };
        let mut line = format!("synced {} of {} {}", self.succeeded(), self.total(), noun);
        let skipped = self.succeeded() - self.created();
        if skipped > 0 {
            line.push_str(&format!(" ({} already on calendar)", skipped));
        }
        line
    }
}
