mod autopilot;
mod config;

use std::path::PathBuf;

use clap::Parser;
use common::api::{ApiBackend, ShowdownApi, USER_NOT_FOUND, User};
use common::{log, logger};

use config::{AccountConfig, Overrides, get_config_manager, load_config};

#[derive(Parser)]
#[command(name = "snake_showdown_client")]
struct Args {
    #[arg(long, default_value = "snake_showdown_client.yaml")]
    config: PathBuf,

    /// Overrides the number of games from the config file.
    #[arg(long)]
    games: Option<u32>,

    /// Plays pass-through games regardless of the config file.
    #[arg(long)]
    pass_through: bool,

    /// Writes the effective config, overrides included, back to --config.
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

async fn sign_in<A: ShowdownApi>(api: &A, account: &AccountConfig) -> Result<User, String> {
    let response = api.login(&account.email, &account.password).await;
    if let Some(user) = response.user.filter(|_| response.success) {
        return Ok(user);
    }

    let error = response.error.unwrap_or_else(|| "Login failed".to_string());
    match &account.username {
        Some(username) if error == USER_NOT_FOUND => {
            log!("No account for {}, signing up as {}", account.email, username);
            let response = api.signup(username, &account.email, &account.password).await;
            match response.user {
                Some(user) if response.success => Ok(user),
                _ => Err(response.error.unwrap_or_else(|| "Signup failed".to_string())),
            }
        }
        _ => Err(error),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let overrides = Overrides {
        games: args.games,
        pass_through: args.pass_through,
    };
    let config = load_config(&get_config_manager(args.config.clone()), overrides, args.save_config)?;
    if args.save_config {
        log!("Saved config to {}", args.config.display());
    }

    let api = ApiBackend::from_config(&config.backend);
    log!("Using {} backend", api.describe());

    let user = sign_in(&api, &config.account).await?;
    log!("Signed in as {}", user.username);

    let reports = autopilot::run_games(&api, &config.game).await;
    let best = reports.iter().map(|r| r.score).max().unwrap_or(0);
    log!("Played {} games in {} mode, best score {}", reports.len(), config.game.mode.as_str(), best);

    let board = api.leaderboard(Some(config.game.mode)).await;
    if board.success {
        for entry in board.entries.iter().take(5) {
            log!("#{} {} {} ({})", entry.rank, entry.username, entry.score, entry.date);
        }
    } else {
        log!("Leaderboard unavailable: {}", board.error.unwrap_or_default());
    }

    api.logout().await;
    Ok(())
}
