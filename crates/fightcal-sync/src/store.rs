//! Tracked fighter storage.
//!
//! The core only needs [`TrackedFighterStore::list_for_user`]. The roster
//! types behind it also cover the fighter catalog, users, and which fighters
//! each user tracks, for the CLI's `fighters` and `session` commands.

use std::path::{Path, PathBuf};

use fightcal_core::{Sport, TrackedFighter};
use fightcal_providers::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Read access to a user's tracked fighters.
pub trait TrackedFighterStore: Send + Sync {
    /// Returns the fighters `user_id` tracks, in the order they were tracked.
    fn list_for_user(&self, user_id: u64) -> BoxFuture<'_, StoreResult<Vec<TrackedFighter>>>;
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub name: String,
    /// Catalog ids of tracked fighters.
    #[serde(default)]
    pub tracked: Vec<u64>,
}

/// The fighter catalog plus users and their tracked fighters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub fighters: Vec<TrackedFighter>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// All catalog fighters, optionally restricted to one sport.
    pub fn catalog(&self, sport: Option<Sport>) -> Vec<TrackedFighter> {
        self.fighters
            .iter()
            .filter(|f| sport.is_none_or(|s| f.sport == s))
            .cloned()
            .collect()
    }

    pub fn fighter(&self, id: u64) -> Option<&TrackedFighter> {
        self.fighters.iter().find(|f| f.id == id)
    }

    /// Finds a catalog fighter by name (case-insensitive) and sport.
    pub fn find_fighter(&self, name: &str, sport: Sport) -> Option<&TrackedFighter> {
        let name = name.trim();
        self.fighters
            .iter()
            .find(|f| f.sport == sport && f.name.eq_ignore_ascii_case(name))
    }

    /// Adds a fighter to the catalog, or returns the existing entry.
    pub fn add_fighter(&mut self, name: &str, sport: Sport) -> StoreResult<TrackedFighter> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Invalid("fighter name is empty".to_string()));
        }
        if let Some(existing) = self.find_fighter(name, sport) {
            return Ok(existing.clone());
        }

        let fighter = TrackedFighter::new(next_id(self.fighters.iter().map(|f| f.id)), name, sport);
        self.fighters.push(fighter.clone());
        Ok(fighter)
    }

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn user_mut(&mut self, id: u64) -> StoreResult<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::UnknownUser(id))
    }

    /// Returns the user registered under `email`, creating it if needed.
    ///
    /// Emails compare case-insensitively. An existing user's name is kept.
    pub fn find_or_create_user(&mut self, email: &str, name: &str) -> StoreResult<User> {
        let email = email.trim();
        if email.is_empty() {
            return Err(StoreError::Invalid("user email is empty".to_string()));
        }
        if let Some(user) = self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email)) {
            return Ok(user.clone());
        }

        let user = User {
            id: next_id(self.users.iter().map(|u| u.id)),
            email: email.to_string(),
            name: name.trim().to_string(),
            tracked: Vec::new(),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    /// Fighters tracked by `user_id`, in tracking order.
    ///
    /// Ids no longer in the catalog are skipped.
    pub fn tracked_for_user(&self, user_id: u64) -> StoreResult<Vec<TrackedFighter>> {
        let user = self.user(user_id).ok_or(StoreError::UnknownUser(user_id))?;
        Ok(user
            .tracked
            .iter()
            .filter_map(|id| self.fighter(*id).cloned())
            .collect())
    }

    /// Starts tracking a catalog fighter.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyTracking`] if the pair already exists, or an
    /// unknown user/fighter error.
    pub fn track(&mut self, user_id: u64, fighter_id: u64) -> StoreResult<TrackedFighter> {
        let fighter = self
            .fighter(fighter_id)
            .cloned()
            .ok_or(StoreError::UnknownFighter(fighter_id))?;
        let user = self.user_mut(user_id)?;

        if user.tracked.contains(&fighter_id) {
            return Err(StoreError::AlreadyTracking {
                user_id,
                fighter: fighter.name,
            });
        }
        user.tracked.push(fighter_id);
        Ok(fighter)
    }

    /// Stops tracking a fighter. Returns whether the pair existed.
    pub fn untrack(&mut self, user_id: u64, fighter_id: u64) -> StoreResult<bool> {
        let user = self.user_mut(user_id)?;
        let before = user.tracked.len();
        user.tracked.retain(|id| *id != fighter_id);
        Ok(user.tracked.len() != before)
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

/// A roster held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    roster: Mutex<Roster>,
}

impl MemoryStore {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster: Mutex::new(roster),
        }
    }

    /// Applies `f` to the roster.
    pub async fn update<T>(&self, f: impl FnOnce(&mut Roster) -> StoreResult<T>) -> StoreResult<T> {
        let mut roster = self.roster.lock().await;
        f(&mut roster)
    }

    /// Returns a copy of the roster.
    pub async fn snapshot(&self) -> Roster {
        self.roster.lock().await.clone()
    }
}

impl TrackedFighterStore for MemoryStore {
    fn list_for_user(&self, user_id: u64) -> BoxFuture<'_, StoreResult<Vec<TrackedFighter>>> {
        Box::pin(async move { self.roster.lock().await.tracked_for_user(user_id) })
    }
}

/// A roster persisted as a TOML file.
///
/// The file is read fresh on every call; a missing file is an empty roster.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the roster.
    pub async fn load(&self) -> StoreResult<Roster> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no roster file, starting empty");
                return Ok(Roster::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        toml::from_str(&contents).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Writes the roster, replacing the file atomically.
    pub async fn save(&self, roster: &Roster) -> StoreResult<()> {
        let contents =
            toml::to_string_pretty(roster).map_err(|e| StoreError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        info!(path = %self.path.display(), "saved roster");
        Ok(())
    }

    /// Loads the roster, applies `f`, and saves it if `f` succeeds.
    pub async fn update<T>(&self, f: impl FnOnce(&mut Roster) -> StoreResult<T>) -> StoreResult<T> {
        let mut roster = self.load().await?;
        let value = f(&mut roster)?;
        self.save(&roster).await?;
        Ok(value)
    }
}

impl TrackedFighterStore for FileStore {
    fn list_for_user(&self, user_id: u64) -> BoxFuture<'_, StoreResult<Vec<TrackedFighter>>> {
        Box::pin(async move { self.load().await?.tracked_for_user(user_id) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.add_fighter("A", Sport::Ufc).unwrap();
        roster.add_fighter("B", Sport::Boxing).unwrap();
        roster.find_or_create_user("fan@example.com", "Fan").unwrap();
        roster
    }

    #[test]
    fn add_fighter_assigns_ids_and_dedupes() {
        let mut roster = roster();
        assert_eq!(roster.fighters.len(), 2);
        let again = roster.add_fighter(" a ", Sport::Ufc).unwrap();
        assert_eq!(again.id, 1);
        let other_sport = roster.add_fighter("A", Sport::Boxing).unwrap();
        assert_eq!(other_sport.id, 3);
        assert!(roster.add_fighter("  ", Sport::Ufc).is_err());
    }

    #[test]
    fn catalog_filters_by_sport() {
        let roster = roster();
        assert_eq!(roster.catalog(None).len(), 2);
        let boxing = roster.catalog(Some(Sport::Boxing));
        assert_eq!(boxing.len(), 1);
        assert_eq!(boxing[0].name, "B");
    }

    #[test]
    fn find_or_create_user_is_idempotent() {
        let mut roster = roster();
        let first = roster.find_or_create_user("FAN@example.com", "Other").unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.name, "Fan");
        let second = roster.find_or_create_user("new@example.com", "New").unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(roster.users.len(), 2);
    }

    #[test]
    fn track_and_untrack() {
        let mut roster = roster();
        roster.track(1, 2).unwrap();
        roster.track(1, 1).unwrap();

        let tracked = roster.tracked_for_user(1).unwrap();
        let names: Vec<_> = tracked.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);

        assert!(roster.untrack(1, 2).unwrap());
        assert!(!roster.untrack(1, 2).unwrap());
        assert_eq!(roster.tracked_for_user(1).unwrap().len(), 1);
    }

    #[test]
    fn track_twice_is_already_tracking() {
        let mut roster = roster();
        roster.track(1, 1).unwrap();
        let err = roster.track(1, 1).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyTracking { user_id: 1, ref fighter } if fighter == "A"));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut roster = roster();
        assert!(matches!(roster.track(1, 99), Err(StoreError::UnknownFighter(99))));
        assert!(matches!(roster.track(42, 1), Err(StoreError::UnknownUser(42))));
        assert!(matches!(roster.tracked_for_user(42), Err(StoreError::UnknownUser(42))));
    }

    #[tokio::test]
    async fn memory_store_lists_tracked() {
        let store = MemoryStore::new(roster());
        store.update(|r| r.track(1, 1)).await.unwrap();
        let tracked = store.list_for_user(1).await.unwrap();
        assert_eq!(tracked, vec![TrackedFighter::new(1, "A", Sport::Ufc)]);
    }

    #[tokio::test]
    async fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("roster.toml"));

        assert_eq!(store.load().await.unwrap(), Roster::new());

        store.save(&roster()).await.unwrap();
        store.update(|r| r.track(1, 2)).await.unwrap();

        let tracked = store.list_for_user(1).await.unwrap();
        assert_eq!(tracked, vec![TrackedFighter::new(2, "B", Sport::Boxing)]);
    }

    #[tokio::test]
    async fn failed_update_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("roster.toml"));
        store.save(&roster()).await.unwrap();

        assert!(store.update(|r| r.track(1, 99)).await.is_err());
        assert!(store.load().await.unwrap().user(1).unwrap().tracked.is_empty());
    }

    #[tokio::test]
    async fn file_store_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(&path, "fighters = 3").unwrap();

        let err = FileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}
