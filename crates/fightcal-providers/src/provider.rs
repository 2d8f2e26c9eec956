//! FightDataProvider trait and the per-sport registry.
//!
//! Each sport has one provider answering "what are the next fights for these
//! fighters". The [`ProviderRegistry`] maps sport tags to providers so callers
//! fan out over whatever sports are registered without naming them.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use fightcal_core::Sport;

use crate::error::{ProviderError, ProviderResult};
use crate::raw_fight::UpcomingFights;

/// A boxed future for async trait methods.
///
/// Keeps the provider traits object-safe so registries can hold
/// `Arc<dyn FightDataProvider>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A per-sport source of upcoming fights.
///
/// # Implementation Notes
///
/// - `upcoming_fights` receives only names of this provider's sport
/// - Fighters without a scheduled fight are omitted from the result
/// - Any transport or non-2xx failure is returned as an error, never as an
///   empty map
pub trait FightDataProvider: Send + Sync {
    /// Returns the name of this provider (e.g. "scraper:ufc").
    fn name(&self) -> &str;

    /// Returns the sport this provider answers for.
    fn sport(&self) -> Sport;

    /// Looks up the next fight for each named fighter.
    fn upcoming_fights(&self, fighters: Vec<String>)
    -> BoxFuture<'_, ProviderResult<UpcomingFights>>;
}

/// Fight data providers keyed by sport.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<Sport, Arc<dyn FightDataProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` under its sport, returning any provider it replaced.
    pub fn register(
        &mut self,
        provider: Arc<dyn FightDataProvider>,
    ) -> Option<Arc<dyn FightDataProvider>> {
        self.providers.insert(provider.sport(), provider)
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_provider(mut self, provider: Arc<dyn FightDataProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Returns the provider for `sport`.
    pub fn get(&self, sport: Sport) -> Option<&Arc<dyn FightDataProvider>> {
        self.providers.get(&sport)
    }

    /// Returns the provider for `sport`, or an `Unsupported` error.
    pub fn require(&self, sport: Sport) -> ProviderResult<&Arc<dyn FightDataProvider>> {
        self.get(sport).ok_or_else(|| {
            ProviderError::unsupported(format!("no fight data provider for {}", sport))
        })
    }

    /// Registered sports, in sport order.
    pub fn sports(&self) -> impl Iterator<Item = Sport> + '_ {
        self.providers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.providers.iter().map(|(sport, p)| (sport, p.name())))
            .finish()
    }
}

/// A provider that always fails.
///
/// Registered in place of a provider that could not be constructed, so only
/// that sport's lookups fail.
#[derive(Debug)]
pub struct ErrorProvider {
    name: String,
    sport: Sport,
    error: ProviderError,
}

impl ErrorProvider {
    pub fn new(sport: Sport, error: ProviderError) -> Self {
        Self {
            name: format!("unavailable:{}", sport),
            sport,
            error,
        }
    }
}

impl FightDataProvider for ErrorProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn sport(&self) -> Sport {
        self.sport
    }

    fn upcoming_fights(
        &self,
        _fighters: Vec<String>,
    ) -> BoxFuture<'_, ProviderResult<UpcomingFights>> {
        let error =
            ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name);
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    #[test]
    fn registry_keys_by_sport() {
        let registry = ProviderRegistry::new()
            .with_provider(Arc::new(ErrorProvider::new(
                Sport::Boxing,
                ProviderError::configuration("no endpoint"),
            )))
            .with_provider(Arc::new(ErrorProvider::new(
                Sport::Ufc,
                ProviderError::configuration("no endpoint"),
            )));

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.sports().collect::<Vec<_>>(),
            vec![Sport::Ufc, Sport::Boxing]
        );
        assert_eq!(registry.get(Sport::Ufc).unwrap().name(), "unavailable:ufc");
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = ProviderRegistry::new();
        let first = registry.register(Arc::new(ErrorProvider::new(
            Sport::Ufc,
            ProviderError::internal("first"),
        )));
        assert!(first.is_none());

        let replaced = registry.register(Arc::new(ErrorProvider::new(
            Sport::Ufc,
            ProviderError::internal("second"),
        )));
        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn require_missing_sport_is_unsupported() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_empty());
        let err = registry.require(Sport::Boxing).err().unwrap();
        assert_eq!(err.code(), ProviderErrorCode::Unsupported);
    }

    #[tokio::test]
    async fn error_provider_returns_error() {
        let provider = ErrorProvider::new(Sport::Ufc, ProviderError::configuration("bad url"));
        let err = provider
            .upcoming_fights(vec!["A".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert_eq!(err.provider(), Some("unavailable:ufc"));
    }
}
