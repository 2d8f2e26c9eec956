//! fightcal CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use fightcal_core::{TracingConfig, init_tracing};
use tokio_util::sync::CancellationToken;
use tracing::info;

use fightcal_client::cli::{Cli, Command, ConfigAction, FightersAction, SessionAction};
use fightcal_client::commands::{self, current_user};
use fightcal_client::config::ClientConfig;
use fightcal_client::error::{ClientError, ClientResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(TracingConfig::cli(cli.debug)) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config)?,
        None => ClientConfig::load().map_err(ClientError::Config)?,
    };
    let session = cli.session.as_deref();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    match cli.command {
        Command::Session { action } => match action {
            SessionAction::Issue { email, name } => {
                commands::session::issue(&config, &email, &name).await
            }
            SessionAction::Show => commands::session::show(&config, session).await,
        },
        Command::Fighters { action } => match action {
            FightersAction::Catalog { sport } => commands::fighters::catalog(&config, sport).await,
            FightersAction::Add { name, sport } => {
                commands::fighters::add(&config, &name, sport).await
            }
            FightersAction::List => {
                let user_id = current_user(&config, session)?;
                commands::fighters::list(&config, user_id).await
            }
            FightersAction::Track { fighter_id } => {
                let user_id = current_user(&config, session)?;
                commands::fighters::track(&config, user_id, fighter_id).await
            }
            FightersAction::Untrack { fighter_id } => {
                let user_id = current_user(&config, session)?;
                commands::fighters::untrack(&config, user_id, fighter_id).await
            }
        },
        Command::Preview { json } => {
            let user_id = current_user(&config, session)?;
            commands::fights::preview(&config, user_id, json, &cancel).await
        }
        Command::Sync {
            fights,
            access_token,
            json,
        } => {
            let user_id = current_user(&config, session)?;
            commands::fights::sync(
                &config,
                user_id,
                fights.as_deref(),
                access_token.as_deref(),
                json,
                &cancel,
            )
            .await
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config),
        },
    }
}
