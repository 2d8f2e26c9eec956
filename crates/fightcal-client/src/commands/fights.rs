//! Preview and sync commands.

use std::path::Path;
use std::sync::Arc;

use fightcal_core::{FightEvent, SyncOutcome, SyncReport};
use fightcal_providers::GoogleCalendarService;
use fightcal_sync::SyncOrchestrator;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Builds the orchestrator from configuration.
pub fn orchestrator(config: &ClientConfig) -> ClientResult<SyncOrchestrator> {
    let calendar = GoogleCalendarService::new(&config.calendar.to_service_config())?;
    Ok(SyncOrchestrator::new(
        Arc::new(config.store.file_store()),
        config.providers.build_registry(),
        Arc::new(calendar),
        config.sync.to_sync_config(),
    ))
}

/// Prints the upcoming fights for the user's tracked fighters.
pub async fn preview(
    config: &ClientConfig,
    user_id: u64,
    json: bool,
    cancel: &CancellationToken,
) -> ClientResult<()> {
    let events = orchestrator(config)?.preview(user_id, cancel).await?;

    if json {
        let out = serde_json::to_string_pretty(&events)
            .map_err(|e| ClientError::Input(format!("failed to encode fights: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    if events.is_empty() {
        println!("No upcoming fights for the fighters you track.");
        return Ok(());
    }
    for event in &events {
        println!("{}", format_event(event));
    }
    Ok(())
}

/// Syncs all previewed fights, or the ones listed in `fights_file`.
pub async fn sync(
    config: &ClientConfig,
    user_id: u64,
    fights_file: Option<&Path>,
    access_token: Option<&str>,
    json: bool,
    cancel: &CancellationToken,
) -> ClientResult<()> {
    let token = config
        .calendar
        .resolve_access_token(access_token)
        .map_err(ClientError::AuthRequired)?;

    let selected = match fights_file {
        Some(path) => Some(read_fights(path).await?),
        None => None,
    };

    let report = orchestrator(config)?
        .sync(user_id, &token, selected, cancel)
        .await?;

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| ClientError::Input(format!("failed to encode report: {}", e)))?;
        println!("{}", out);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Reads a JSON array of fights as written by `preview --json`.
async fn read_fights(path: &Path) -> ClientResult<Vec<FightEvent>> {
    let content = tokio::fs::read_to_string(path).await?;
    let fights: Vec<FightEvent> = serde_json::from_str(&content).map_err(|e| {
        ClientError::Input(format!("{} is not a list of fights: {}", path.display(), e))
    })?;
    debug!(count = fights.len(), path = %path.display(), "loaded selected fights");
    Ok(fights)
}

fn format_event(event: &FightEvent) -> String {
    let mut line = format!(
        "{}  {}",
        event.start.format("%Y-%m-%d %H:%M UTC"),
        event.summary()
    );
    if !event.location.is_empty() {
        line.push_str(&format!(" @ {}", event.location));
    }
    line.push_str(&format!("  [{}]", event.fighter_name));
    line
}

fn print_report(report: &SyncReport) {
    for result in &report.results {
        let (status, detail) = match &result.outcome {
            SyncOutcome::Success {
                event_id,
                created: true,
            } => ("added", event_id.as_str()),
            SyncOutcome::Success {
                event_id,
                created: false,
            } => ("exists", event_id.as_str()),
            SyncOutcome::Failure { reason } => ("failed", reason.as_str()),
        };
        println!("{:<7} {}  ({})", status, format_event(&result.event), detail);
    }
    println!("{}", report.summary());
}
