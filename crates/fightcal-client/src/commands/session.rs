//! Session commands.

use fightcal_sync::User;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Finds or creates the user for `email` and prints a session token for them.
pub async fn issue(config: &ClientConfig, email: &str, name: &str) -> ClientResult<()> {
    let authority = config.session.authority().map_err(ClientError::Config)?;
    let store = config.store.file_store();

    let user: User = store
        .update(|roster| roster.find_or_create_user(email, name))
        .await?;
    let token = authority.issue(&user)?;

    eprintln!(
        "Signed in as {} (user {}), valid for {} minutes.",
        user.email,
        user.id,
        authority.ttl().as_secs() / 60
    );
    println!("{}", token);
    Ok(())
}

/// Prints the identity behind the current session.
pub async fn show(config: &ClientConfig, session_flag: Option<&str>) -> ClientResult<()> {
    let token = config
        .session
        .resolve_token(session_flag)
        .map_err(ClientError::Config)?
        .ok_or_else(|| ClientError::AuthRequired("no session token".to_string()))?;
    let authority = config.session.authority().map_err(ClientError::Config)?;
    let claims = authority.verify(&token)?;

    let expires = chrono::DateTime::from_timestamp(claims.exp, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| claims.exp.to_string());

    println!("user:    {}", claims.user_id);
    println!("email:   {}", claims.user_email);
    if !claims.user_name.is_empty() {
        println!("name:    {}", claims.user_name);
    }
    println!("expires: {}", expires);
    Ok(())
}
