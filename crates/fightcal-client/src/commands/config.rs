//! Configuration commands.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);
    Ok(())
}

/// Validate the configuration, including secret references.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;

    if config.calendar.access_token.is_some() {
        config
            .calendar
            .resolve_access_token(None)
            .map_err(ClientError::Config)?;
        println!("Calendar access token resolves.");
    }
    if config.session.secret.is_some() {
        config.session.authority().map_err(ClientError::Config)?;
        println!("Session secret resolves.");
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration and roster file paths.
pub fn path(config: &ClientConfig) -> ClientResult<()> {
    println!("config: {}", ClientConfig::default_path().display());
    println!("roster: {}", config.store.roster_path().display());
    Ok(())
}
