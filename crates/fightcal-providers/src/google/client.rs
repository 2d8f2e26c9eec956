//! Google Calendar API client.
//!
//! Low-level calls used by fight sync: inserting an event, and finding an
//! event by the private extended property that carries a fight's content key.

use std::collections::BTreeMap;

use fightcal_core::FightEvent;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::AccessToken;
use crate::error::{ProviderError, ProviderResult};
use crate::http::{build_client, read_body, send_error};

use super::config::GoogleCalendarConfig;

/// Private extended property holding [`FightEvent::key`].
pub const FIGHT_KEY_PROPERTY: &str = "fightcalKey";

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    api_base: String,
}

impl GoogleCalendarClient {
    pub fn new(config: &GoogleCalendarConfig) -> ProviderResult<Self> {
        Ok(Self {
            http_client: build_client(config.timeout, &config.user_agent)?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.api_base,
            urlencoding::encode(calendar_id)
        )
    }

    /// Inserts an event and returns the created resource.
    pub async fn insert_event(
        &self,
        token: &AccessToken,
        calendar_id: &str,
        body: &ApiEventBody,
    ) -> ProviderResult<ApiEvent> {
        let response = self
            .http_client
            .post(self.events_url(calendar_id))
            .bearer_auth(token.secret())
            .json(body)
            .send()
            .await
            .map_err(send_error)?;

        let body = read_body(response).await?;
        let event: ApiEvent = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse inserted event: {}", e))
        })?;

        debug!(event_id = ?event.id, "inserted calendar event");
        Ok(event)
    }

    /// Returns the id of a live event whose private property `key` equals `value`.
    pub async fn find_by_private_property(
        &self,
        token: &AccessToken,
        calendar_id: &str,
        key: &str,
        value: &str,
    ) -> ProviderResult<Option<String>> {
        let response = self
            .http_client
            .get(self.events_url(calendar_id))
            .bearer_auth(token.secret())
            .query(&[
                ("privateExtendedProperty", format!("{}={}", key, value)),
                ("showDeleted", "false".to_string()),
                ("maxResults", "5".to_string()),
            ])
            .send()
            .await
            .map_err(send_error)?;

        let body = read_body(response).await?;
        let list: EventListResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse event list: {}", e))
        })?;

        Ok(list
            .items
            .into_iter()
            .filter(|e| e.status.as_deref() != Some("cancelled"))
            .find_map(|e| e.id))
    }
}

/// Request body for events.insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventBody {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: String,
    pub start: ApiEventTime,
    pub end: ApiEventTime,
    pub extended_properties: ApiExtendedProperties,
}

impl ApiEventBody {
    /// Builds the insert payload for a fight, tagged with its content key.
    pub fn from_fight(event: &FightEvent) -> Self {
        let mut private = BTreeMap::new();
        private.insert(FIGHT_KEY_PROPERTY.to_string(), event.key());

        Self {
            summary: event.summary(),
            location: (!event.location.is_empty()).then(|| event.location.clone()),
            description: event.description.clone(),
            start: ApiEventTime {
                date_time: event.start.to_rfc3339(),
            },
            end: ApiEventTime {
                date_time: event.end.to_rfc3339(),
            },
            extended_properties: ApiExtendedProperties { private },
        }
    }
}

/// A timed event boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventTime {
    pub date_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiExtendedProperties {
    pub private: BTreeMap<String, String>,
}

/// The subset of an event resource the sync reads back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    pub id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
}
