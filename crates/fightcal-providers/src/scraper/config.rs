//! Scraper endpoint configuration.

use std::time::Duration;

use fightcal_core::Sport;

use crate::http::parse_http_url;

/// Default base URL of the scraper service.
pub const DEFAULT_SCRAPER_BASE_URL: &str = "http://localhost:8000";

/// Configuration for one sport's scraper endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Full URL of the upcoming-fights endpoint.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with each request.
    pub user_agent: String,
}

impl ScraperConfig {
    /// Creates a config for an explicit endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("fightcal/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Creates a config for `sport` on a scraper service rooted at `base_url`.
    ///
    /// The service mounts each sport under its own path
    /// (`/UFC/upcoming-fights`, `/boxing/upcoming-fights`) relative to the
    /// base path. An unparsable base is kept as the endpoint so that
    /// [`ScraperConfig::validate`] reports it.
    pub fn for_sport(base_url: &str, sport: Sport) -> Self {
        let endpoint = parse_http_url(base_url)
            .and_then(|mut base| {
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                base.join(&format!("{}/upcoming-fights", sport_path(sport)))
                    .map_err(|e| e.to_string())
            })
            .map(String::from)
            .unwrap_or_else(|_| base_url.to_string());
        Self::new(endpoint)
    }

    /// Builder: set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: set user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the endpoint URL.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("scraper endpoint is empty".to_string());
        }
        parse_http_url(&self.endpoint).map_err(|e| format!("scraper endpoint: {}", e))?;
        if self.timeout.is_zero() {
            return Err("scraper timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

fn sport_path(sport: Sport) -> &'static str {
    match sport {
        Sport::Ufc => "UFC",
        Sport::Boxing => "boxing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_per_sport() {
        assert_eq!(
            ScraperConfig::for_sport("http://localhost:8000/", Sport::Ufc).endpoint,
            "http://localhost:8000/UFC/upcoming-fights"
        );
        assert_eq!(
            ScraperConfig::for_sport(DEFAULT_SCRAPER_BASE_URL, Sport::Boxing).endpoint,
            "http://localhost:8000/boxing/upcoming-fights"
        );
    }

    #[test]
    fn endpoints_keep_base_path() {
        assert_eq!(
            ScraperConfig::for_sport("https://scraper.example.com/api", Sport::Ufc).endpoint,
            "https://scraper.example.com/api/UFC/upcoming-fights"
        );
    }

    #[test]
    fn malformed_base_fails_validation() {
        let config = ScraperConfig::for_sport("http://", Sport::Ufc);
        assert_eq!(config.endpoint, "http://");
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_and_validation() {
        let config = ScraperConfig::new("https://scraper.example.com/ufc")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_endpoints() {
        assert!(ScraperConfig::new("").validate().is_err());
        assert!(ScraperConfig::new("ftp://host/x").validate().is_err());
        assert!(ScraperConfig::new("http://").validate().is_err());
        assert!(
            ScraperConfig::new("http:// exa mple/upcoming")
                .validate()
                .is_err()
        );
        assert!(ScraperConfig::new("https://[::1").validate().is_err());
        assert!(
            ScraperConfig::new("http://host/x")
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }
}
