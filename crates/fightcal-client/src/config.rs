//! Client configuration.
//!
//! All settings live in one `config.toml`, by default at
//! `~/.config/fightcal/config.toml`. Every section is optional.
//!
//! ```toml
//! [providers]
//! base_url = "http://localhost:8000"
//!
//! [calendar]
//! calendar_id = "primary"
//! access_token = "env::GOOGLE_ACCESS_TOKEN"
//!
//! [sync]
//! workers = 4
//! skip_existing = true
//!
//! [session]
//! secret = "pass::fightcal/session-secret"
//! token = "env::FIGHTCAL_SESSION"
//! ttl_secs = 3600
//!
//! [store]
//! roster_path = "/home/me/.local/share/fightcal/roster.toml"
//! ```
//!
//! `access_token`, `secret` and `token` accept secret references (see
//! [`crate::secret`]).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use fightcal_core::Sport;
use fightcal_providers::google::CALENDAR_API_BASE;
use fightcal_providers::{
    AccessToken, DEFAULT_SCRAPER_BASE_URL, ErrorProvider, GoogleCalendarConfig, HttpFightProvider,
    ProviderRegistry, ScraperConfig,
};
use fightcal_sync::{DEFAULT_SESSION_TTL, FileStore, HmacSessionAuthority, SyncConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::secret;

/// Configuration for the fightcal client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Fight data providers.
    pub providers: ProviderSettings,

    /// Target calendar.
    pub calendar: CalendarSettings,

    /// Sync engine settings.
    pub sync: SyncSettings,

    /// Session signing and the current session.
    pub session: SessionSettings,

    /// Roster storage.
    pub store: StoreSettings,
}

/// Scraper endpoints, one per sport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Base URL; each sport's endpoint is derived from it unless overridden.
    pub base_url: String,

    /// Full UFC endpoint URL.
    pub ufc_endpoint: Option<String>,

    /// Full boxing endpoint URL.
    pub boxing_endpoint: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SCRAPER_BASE_URL.to_string(),
            ufc_endpoint: None,
            boxing_endpoint: None,
            timeout_secs: 30,
        }
    }
}

impl ProviderSettings {
    /// Scraper configuration for `sport`.
    pub fn scraper_config(&self, sport: Sport) -> ScraperConfig {
        let endpoint = match sport {
            Sport::Ufc => self.ufc_endpoint.as_deref(),
            Sport::Boxing => self.boxing_endpoint.as_deref(),
        };
        let config = match endpoint {
            Some(endpoint) => ScraperConfig::new(endpoint),
            None => ScraperConfig::for_sport(&self.base_url, sport),
        };
        config.with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Builds a registry with a provider for every sport.
    ///
    /// A sport whose provider cannot be built gets an [`ErrorProvider`], so
    /// only lookups for that sport fail.
    pub fn build_registry(&self) -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        for sport in Sport::ALL {
            match HttpFightProvider::new(sport, &self.scraper_config(sport)) {
                Ok(provider) => {
                    registry.register(Arc::new(provider));
                }
                Err(e) => {
                    warn!(sport = %sport, error = %e, "fight data provider unavailable");
                    registry.register(Arc::new(ErrorProvider::new(sport, e)));
                }
            }
        }
        registry
    }

    pub fn validate(&self) -> Result<(), String> {
        for sport in Sport::ALL {
            self.scraper_config(sport)
                .validate()
                .map_err(|e| format!("[providers] {}: {}", sport, e))?;
        }
        Ok(())
    }
}

/// Google Calendar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Calendar API base URL.
    pub api_base: String,

    /// Calendar to write to.
    pub calendar_id: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Default access token (supports `pass::` and `env::` prefixes).
    pub access_token: Option<String>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            api_base: CALENDAR_API_BASE.to_string(),
            calendar_id: "primary".to_string(),
            timeout_secs: 30,
            access_token: None,
        }
    }
}

impl CalendarSettings {
    /// Converts to the calendar service configuration.
    pub fn to_service_config(&self) -> GoogleCalendarConfig {
        GoogleCalendarConfig::new()
            .with_api_base(&self.api_base)
            .with_calendar_id(&self.calendar_id)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Resolves the access token, preferring `flag` over the configured value.
    pub fn resolve_access_token(&self, flag: Option<&str>) -> Result<AccessToken, String> {
        let raw = flag.or(self.access_token.as_deref()).ok_or_else(|| {
            format!(
                "no calendar access token. Pass --access-token or add to {}:\n  \
                 [calendar]\n  \
                 access_token = \"env::GOOGLE_ACCESS_TOKEN\"",
                ClientConfig::default_path().display()
            )
        })?;

        let token = secret::resolve(raw).map_err(|e| format!("failed to resolve access_token: {}", e))?;
        if token.trim().is_empty() {
            return Err("calendar access token is empty".to_string());
        }
        Ok(AccessToken::new(token))
    }
}

/// Sync engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Concurrent calendar insert workers.
    pub workers: usize,

    /// Skip fights already on the calendar.
    pub skip_existing: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        let defaults = SyncConfig::default();
        Self {
            workers: defaults.workers,
            skip_existing: defaults.skip_existing,
        }
    }
}

impl SyncSettings {
    pub fn to_sync_config(&self) -> SyncConfig {
        SyncConfig::new()
            .with_workers(self.workers)
            .with_skip_existing(self.skip_existing)
    }
}

/// Session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Signing secret (supports `pass::` and `env::` prefixes).
    pub secret: Option<String>,

    /// Current session token (supports `pass::` and `env::` prefixes).
    pub token: Option<String>,

    /// Lifetime of issued sessions, in seconds.
    pub ttl_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            secret: None,
            token: None,
            ttl_secs: DEFAULT_SESSION_TTL.as_secs(),
        }
    }
}

impl SessionSettings {
    /// Builds the session authority from the configured secret.
    pub fn authority(&self) -> Result<HmacSessionAuthority, String> {
        let raw = self.secret.as_deref().ok_or_else(|| {
            format!(
                "no session secret. Add to {}:\n  \
                 [session]\n  \
                 secret = \"env::FIGHTCAL_SESSION_SECRET\"",
                ClientConfig::default_path().display()
            )
        })?;
        let secret = secret::resolve(raw).map_err(|e| format!("failed to resolve secret: {}", e))?;

        HmacSessionAuthority::new(secret)
            .map(|authority| authority.with_ttl(Duration::from_secs(self.ttl_secs)))
            .map_err(|e| e.to_string())
    }

    /// Resolves the session token, preferring `flag` over the configured value.
    pub fn resolve_token(&self, flag: Option<&str>) -> Result<Option<String>, String> {
        secret::resolve_optional(flag.or(self.token.as_deref()))
            .map_err(|e| format!("failed to resolve session token: {}", e))
    }
}

/// Roster storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Roster file; defaults to `roster.toml` in the data directory.
    pub roster_path: Option<PathBuf>,
}

impl StoreSettings {
    pub fn roster_path(&self) -> PathBuf {
        self.roster_path
            .clone()
            .unwrap_or_else(|| ClientConfig::default_data_dir().join("roster.toml"))
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.roster_path())
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Checks every section that can be checked without network access.
    pub fn validate(&self) -> Result<(), String> {
        self.providers.validate()?;
        self.calendar
            .to_service_config()
            .validate()
            .map_err(|e| format!("[calendar] {}", e))?;
        if self.sync.workers == 0 {
            return Err("[sync] workers must be at least 1".to_string());
        }
        if self.session.ttl_secs == 0 {
            return Err("[session] ttl_secs must be at least 1".to_string());
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fightcal")
    }

    /// Returns the default data directory.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fightcal")
    }
}
