//! Fighter catalog and tracking commands.

use fightcal_core::{Sport, TrackedFighter};
use fightcal_sync::TrackedFighterStore;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Lists catalog fighters.
pub async fn catalog(config: &ClientConfig, sport: Option<Sport>) -> ClientResult<()> {
    let roster = config.store.file_store().load().await?;
    let fighters = roster.catalog(sport);
    if fighters.is_empty() {
        println!("The catalog is empty. Add fighters with `fightcal fighters add NAME --sport ufc`.");
        return Ok(());
    }
    print_fighters(&fighters);
    Ok(())
}

/// Adds a fighter to the catalog.
pub async fn add(config: &ClientConfig, name: &str, sport: Sport) -> ClientResult<()> {
    let fighter = config
        .store
        .file_store()
        .update(|roster| roster.add_fighter(name, sport))
        .await?;
    println!("{:>4}  {} ({})", fighter.id, fighter.name, fighter.sport.display_name());
    Ok(())
}

/// Lists the fighters `user_id` tracks.
pub async fn list(config: &ClientConfig, user_id: u64) -> ClientResult<()> {
    let fighters = config.store.file_store().list_for_user(user_id).await?;
    if fighters.is_empty() {
        println!("You are not tracking any fighters.");
        return Ok(());
    }
    print_fighters(&fighters);
    Ok(())
}

/// Starts tracking a fighter.
pub async fn track(config: &ClientConfig, user_id: u64, fighter_id: u64) -> ClientResult<()> {
    let fighter = config
        .store
        .file_store()
        .update(|roster| roster.track(user_id, fighter_id))
        .await?;
    println!("Now tracking {}.", fighter.name);
    Ok(())
}

/// Stops tracking a fighter.
pub async fn untrack(config: &ClientConfig, user_id: u64, fighter_id: u64) -> ClientResult<()> {
    let removed = config
        .store
        .file_store()
        .update(|roster| roster.untrack(user_id, fighter_id))
        .await?;
    if removed {
        println!("Stopped tracking fighter {}.", fighter_id);
    } else {
        println!("You were not tracking fighter {}.", fighter_id);
    }
    Ok(())
}

fn print_fighters(fighters: &[TrackedFighter]) {
    for fighter in fighters {
        println!("{:>4}  {:<7} {}", fighter.id, fighter.sport.display_name(), fighter.name);
    }
}
