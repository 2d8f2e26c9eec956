//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fightcal_core::Sport;

/// fightcal - Upcoming fights for the fighters you follow, on your calendar
#[derive(Debug, Parser)]
#[command(name = "fightcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "FIGHTCAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Session token (overrides [session] token in config)
    #[arg(long, env = "FIGHTCAL_SESSION", hide_env_values = true)]
    pub session: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Session commands
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Fighter catalog and tracking
    Fighters {
        #[command(subcommand)]
        action: FightersAction,
    },

    /// Show upcoming fights for tracked fighters without touching the calendar
    Preview {
        /// Output as JSON (accepted by `sync --fights`)
        #[arg(long)]
        json: bool,
    },

    /// Add upcoming fights to the calendar
    Sync {
        /// JSON file of previewed fights to sync instead of all of them
        #[arg(long)]
        fights: Option<PathBuf>,

        /// Calendar access token (overrides [calendar] access_token in config)
        #[arg(long, env = "FIGHTCAL_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,

        /// Output the sync report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Session actions.
#[derive(Debug, Subcommand)]
pub enum SessionAction {
    /// Sign in: find or create the user and print a session token
    Issue {
        /// User email
        #[arg(long)]
        email: String,

        /// Display name
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Show who the current session belongs to
    Show,
}

/// Fighter actions.
#[derive(Debug, Subcommand)]
pub enum FightersAction {
    /// List the fighter catalog
    Catalog {
        /// Only show fighters of this sport
        #[arg(long)]
        sport: Option<Sport>,
    },

    /// Add a fighter to the catalog
    Add {
        /// Fighter name as the data providers know it
        name: String,

        /// Sport (ufc or boxing)
        #[arg(long)]
        sport: Sport,
    },

    /// List the fighters you track
    List,

    /// Start tracking a catalog fighter
    Track {
        /// Catalog fighter id
        fighter_id: u64,
    },

    /// Stop tracking a fighter
    Untrack {
        /// Catalog fighter id
        fighter_id: u64,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sync_with_selection() {
        let cli = Cli::try_parse_from([
            "fightcal",
            "sync",
            "--fights",
            "fights.json",
            "--access-token",
            "ya29.x",
        ])
        .unwrap();
        match cli.command {
            Command::Sync {
                fights,
                access_token,
                json,
            } => {
                assert_eq!(fights, Some(PathBuf::from("fights.json")));
                assert_eq!(access_token.as_deref(), Some("ya29.x"));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_fighter_add_with_sport() {
        let cli = Cli::try_parse_from(["fightcal", "fighters", "add", "Jon Jones", "--sport", "mma"])
            .unwrap();
        match cli.command {
            Command::Fighters {
                action: FightersAction::Add { name, sport },
            } => {
                assert_eq!(name, "Jon Jones");
                assert_eq!(sport, Sport::Ufc);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_sport_rejected() {
        assert!(
            Cli::try_parse_from(["fightcal", "fighters", "catalog", "--sport", "chess"]).is_err()
        );
    }
}
