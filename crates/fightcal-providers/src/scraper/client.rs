//! HTTP client for a scraper's upcoming-fights endpoint.

use fightcal_core::Sport;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{ProviderError, ProviderResult};
use crate::http::{build_client, read_body, send_error};
use crate::provider::{BoxFuture, FightDataProvider};
use crate::raw_fight::{UpcomingFights, parse_upcoming_fights};

use super::config::ScraperConfig;

/// Request body for the upcoming-fights endpoint.
#[derive(Debug, Serialize)]
struct FighterListRequest<'a> {
    fighters: &'a [String],
}

/// A [`FightDataProvider`] backed by a scraper service over HTTP.
#[derive(Debug)]
pub struct HttpFightProvider {
    name: String,
    sport: Sport,
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpFightProvider {
    /// Creates a provider for `sport` using `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint is invalid or the HTTP
    /// client cannot be built.
    pub fn new(sport: Sport, config: &ScraperConfig) -> ProviderResult<Self> {
        config.validate().map_err(ProviderError::configuration)?;
        let http_client = build_client(config.timeout, &config.user_agent)?;

        Ok(Self {
            name: format!("scraper:{}", sport),
            sport,
            endpoint: config.endpoint.clone(),
            http_client,
        })
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, fighters), fields(provider = %self.name, count = fighters.len()))]
    async fn fetch(&self, fighters: Vec<String>) -> ProviderResult<UpcomingFights> {
        if fighters.is_empty() {
            return Ok(UpcomingFights::new());
        }

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&FighterListRequest {
                fighters: &fighters,
            })
            .send()
            .await
            .map_err(|e| send_error(e).with_provider(&self.name))?;

        let body = read_body(response)
            .await
            .map_err(|e| e.with_provider(&self.name))?;

        let fights = parse_upcoming_fights(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
                .with_provider(&self.name)
        })?;

        debug!(matched = fights.len(), "scraper answered");
        Ok(fights)
    }
}

impl FightDataProvider for HttpFightProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn sport(&self) -> Sport {
        self.sport
    }

    fn upcoming_fights(
        &self,
        fighters: Vec<String>,
    ) -> BoxFuture<'_, ProviderResult<UpcomingFights>> {
        Box::pin(self.fetch(fighters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_name_includes_sport() {
        let config = ScraperConfig::for_sport("http://localhost:8000", Sport::Boxing);
        let provider = HttpFightProvider::new(Sport::Boxing, &config).unwrap();
        assert_eq!(provider.name(), "scraper:boxing");
        assert_eq!(provider.sport(), Sport::Boxing);
        assert_eq!(
            provider.endpoint(),
            "http://localhost:8000/boxing/upcoming-fights"
        );
    }

    #[test]
    fn invalid_endpoint_is_configuration_error() {
        let err = HttpFightProvider::new(Sport::Ufc, &ScraperConfig::new("not a url")).unwrap_err();
        assert_eq!(
            err.code(),
            crate::error::ProviderErrorCode::ConfigurationError
        );
    }

    #[test]
    fn request_body_shape() {
        let fighters = vec!["A".to_string(), "B".to_string()];
        let json = serde_json::to_string(&FighterListRequest {
            fighters: &fighters,
        })
        .unwrap();
        assert_eq!(json, r#"{"fighters":["A","B"]}"#);
    }

    #[tokio::test]
    async fn empty_fighter_list_skips_request() {
        // Port 9 (discard) is never contacted when there is nothing to ask.
        let config = ScraperConfig::new("http://127.0.0.1:9/UFC/upcoming-fights");
        let provider = HttpFightProvider::new(Sport::Ufc, &config).unwrap();
        let fights = provider.upcoming_fights(Vec::new()).await.unwrap();
        assert!(fights.is_empty());
    }
}
