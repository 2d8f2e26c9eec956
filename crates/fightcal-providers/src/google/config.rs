//! Google Calendar service configuration.

use std::time::Duration;

use crate::http::parse_http_url;

/// Base URL for Google Calendar API v3.
pub const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Configuration for writing fight events to Google Calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleCalendarConfig {
    /// API base URL. Overridden in tests to point at a mock server.
    pub api_base: String,
    /// Target calendar; `"primary"` is the signed-in user's main calendar.
    pub calendar_id: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for API requests.
    pub user_agent: String,
}

impl Default for GoogleCalendarConfig {
    fn default() -> Self {
        Self {
            api_base: CALENDAR_API_BASE.to_string(),
            calendar_id: "primary".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("fightcal/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GoogleCalendarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the target calendar.
    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }

    /// Builder: set the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Builder: set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.calendar_id.trim().is_empty() {
            return Err("calendar_id is required".to_string());
        }
        parse_http_url(&self.api_base).map_err(|e| format!("api_base: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_primary_calendar() {
        let config = GoogleCalendarConfig::default();
        assert_eq!(config.calendar_id, "primary");
        assert_eq!(config.api_base, CALENDAR_API_BASE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let config = GoogleCalendarConfig::new()
            .with_calendar_id("fights@group.calendar.google.com")
            .with_api_base("http://127.0.0.1:1234")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.calendar_id, "fights@group.calendar.google.com");
        assert_eq!(config.api_base, "http://127.0.0.1:1234");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn validation_errors() {
        assert!(
            GoogleCalendarConfig::new()
                .with_calendar_id(" ")
                .validate()
                .is_err()
        );
        assert!(
            GoogleCalendarConfig::new()
                .with_api_base("googleapis.com")
                .validate()
                .is_err()
        );
        for bad in ["http://", "http:// exa mple/v3", "https://[::1"] {
            assert!(
                GoogleCalendarConfig::new()
                    .with_api_base(bad)
                    .validate()
                    .is_err(),
                "{} should be rejected",
                bad
            );
        }
    }
}
