//! Subcommand implementations.

pub mod config;
pub mod fighters;
pub mod fights;
pub mod session;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Resolves the current session to a user id.
///
/// The token comes from `--session`/`FIGHTCAL_SESSION` or `[session] token`.
pub fn current_user(config: &ClientConfig, session_flag: Option<&str>) -> ClientResult<u64> {
    let token = config
        .session
        .resolve_token(session_flag)
        .map_err(ClientError::Config)?
        .ok_or_else(|| {
            ClientError::AuthRequired(
                "no session. Run `fightcal session issue --email <EMAIL>` and pass the token with --session"
                    .to_string(),
            )
        })?;

    let authority = config.session.authority().map_err(ClientError::Config)?;
    let user_id = fightcal_sync::SessionAuthority::resolve(&authority, &token)?;
    Ok(user_id)
}
