//! FightAggregator: fans a user's tracked fighters out to per-sport providers
//! and merges the answers into one fighter → fight map.

use std::collections::BTreeMap;

use fightcal_core::{Sport, TrackedFighter};
use fightcal_providers::{ProviderRegistry, UpcomingFights};
use futures_util::future::try_join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::error::{ServiceError, ServiceResult};

/// Queries every sport's provider and merges the results.
#[derive(Debug, Clone)]
pub struct FightAggregator {
    registry: ProviderRegistry,
}

impl FightAggregator {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Returns the next fight for each tracked fighter a provider knows about.
    ///
    /// Each provider only sees names of its own sport, and sports with no
    /// tracked fighters are not queried. Fighters without a scheduled fight
    /// are absent from the result. Providers are queried concurrently; if
    /// two answer for the same name, the later sport in [`Sport`] order wins.
    ///
    /// # Errors
    ///
    /// [`ServiceError::ProviderUnavailable`] if any queried provider fails or
    /// is not registered, [`ServiceError::Cancelled`] if `cancel` fires first.
    #[instrument(skip_all, fields(fighters = fighters.len()))]
    pub async fn aggregate(
        &self,
        fighters: &[TrackedFighter],
        cancel: &CancellationToken,
    ) -> ServiceResult<UpcomingFights> {
        let partitions = partition_by_sport(fighters);
        if partitions.is_empty() {
            debug!("no tracked fighters, skipping providers");
            return Ok(UpcomingFights::new());
        }

        let mut queries = Vec::with_capacity(partitions.len());
        for (sport, names) in partitions {
            let provider = self
                .registry
                .require(sport)
                .map_err(|e| ServiceError::provider_unavailable(sport, e))?
                .clone();

            queries.push(async move {
                debug!(provider = provider.name(), count = names.len(), "querying provider");
                provider
                    .upcoming_fights(names)
                    .await
                    .map(|fights| (sport, fights))
                    .map_err(|e| {
                        warn!(
                            sport = %sport,
                            error = %e,
                            retryable = e.is_retryable(),
                            "fight data lookup failed"
                        );
                        ServiceError::provider_unavailable(sport, e)
                    })
            });
        }

        let responses = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ServiceError::Cancelled),
            responses = try_join_all(queries) => responses?,
        };

        let merged = merge(responses);
        info!(matched = merged.len(), "aggregated upcoming fights");
        Ok(merged)
    }
}

/// Groups fighter names by sport, trimmed and de-duplicated, in first-seen order.
fn partition_by_sport(fighters: &[TrackedFighter]) -> BTreeMap<Sport, Vec<String>> {
    let mut partitions: BTreeMap<Sport, Vec<String>> = BTreeMap::new();
    for fighter in fighters {
        let name = fighter.name.trim();
        if name.is_empty() {
            continue;
        }
        let names = partitions.entry(fighter.sport).or_default();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    partitions
}

/// Merges per-sport responses in order; later entries overwrite earlier ones.
fn merge(responses: Vec<(Sport, UpcomingFights)>) -> UpcomingFights {
    let mut merged = UpcomingFights::new();
    for (sport, fights) in responses {
        for (name, record) in fights {
            if merged.insert(name.clone(), record).is_some() {
                debug!(fighter = %name, sport = %sport, "fighter returned by two providers, keeping later");
            }
        }
    }
    merged
}
