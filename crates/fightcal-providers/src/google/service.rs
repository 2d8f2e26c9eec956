//! [`CalendarService`] implementation for Google Calendar.

use fightcal_core::FightEvent;
use tracing::{debug, instrument};

use crate::calendar::{AccessToken, CalendarService};
use crate::error::{ProviderError, ProviderResult};
use crate::provider::BoxFuture;

use super::client::{ApiEventBody, FIGHT_KEY_PROPERTY, GoogleCalendarClient};
use super::config::GoogleCalendarConfig;

const SERVICE_NAME: &str = "google-calendar";

/// Writes fight events to one Google calendar.
#[derive(Debug)]
pub struct GoogleCalendarService {
    client: GoogleCalendarClient,
    calendar_id: String,
}

impl GoogleCalendarService {
    /// Creates a service for the calendar named in `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &GoogleCalendarConfig) -> ProviderResult<Self> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration(e).with_provider(SERVICE_NAME))?;

        Ok(Self {
            client: GoogleCalendarClient::new(config)?,
            calendar_id: config.calendar_id.clone(),
        })
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    #[instrument(skip_all, fields(calendar = %self.calendar_id, summary = %event.summary()))]
    async fn insert(&self, token: &AccessToken, event: &FightEvent) -> ProviderResult<String> {
        if token.is_empty() {
            return Err(ProviderError::authentication("calendar access token is empty")
                .with_provider(SERVICE_NAME));
        }

        let body = ApiEventBody::from_fight(event);
        let created = self
            .client
            .insert_event(token, &self.calendar_id, &body)
            .await
            .map_err(|e| e.with_provider(SERVICE_NAME))?;

        created.id.ok_or_else(|| {
            ProviderError::invalid_response("inserted event has no id").with_provider(SERVICE_NAME)
        })
    }

    async fn find(&self, token: &AccessToken, event: &FightEvent) -> ProviderResult<Option<String>> {
        if token.is_empty() {
            return Err(ProviderError::authentication("calendar access token is empty")
                .with_provider(SERVICE_NAME));
        }

        let found = self
            .client
            .find_by_private_property(token, &self.calendar_id, FIGHT_KEY_PROPERTY, &event.key())
            .await
            .map_err(|e| e.with_provider(SERVICE_NAME))?;

        if let Some(id) = &found {
            debug!(event_id = %id, "fight already on calendar");
        }
        Ok(found)
    }
}

impl CalendarService for GoogleCalendarService {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn insert_event<'a>(
        &'a self,
        token: &'a AccessToken,
        event: &'a FightEvent,
    ) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(self.insert(token, event))
    }

    fn find_event<'a>(
        &'a self,
        token: &'a AccessToken,
        event: &'a FightEvent,
    ) -> BoxFuture<'a, ProviderResult<Option<String>>> {
        Box::pin(self.find(token, event))
    }
}
