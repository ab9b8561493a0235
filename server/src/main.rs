mod routes;
mod server_config;
mod web_server;

use std::path::PathBuf;

use clap::Parser;
use common::api::ShowdownStore;
use common::config::{ConfigManager, FileContentConfigProvider};
use common::engine::session::SpectatorPool;
use common::{log, logger};

use server_config::{ServerConfig, load_server_config};
use web_server::{WebServerState, run_web_server};

#[derive(Parser)]
#[command(name = "snake_showdown_server")]
struct Args {
    #[arg(long, default_value = "snake_showdown_server.yaml")]
    config: PathBuf,

    /// Overrides bind_address from the config file.
    #[arg(long)]
    bind_address: Option<String>,

    /// Writes the effective config, overrides included, back to --config.
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager: ConfigManager<FileContentConfigProvider, ServerConfig> =
        ConfigManager::from_yaml_file(args.config.clone());
    let config = load_server_config(&config_manager, args.bind_address, args.save_config)?;
    if args.save_config {
        log!("Saved config to {}", args.config.display());
    }

    let store = if config.mock_data {
        ShowdownStore::with_mock_data()
    } else {
        ShowdownStore::new()
    };
    log!("Store ready with {} accounts", store.user_count());

    let spectators = SpectatorPool::spawn(&config.spectators);
    let state = WebServerState::new(store, spectators.clone());

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    run_web_server(&config.bind_address, state, shutdown_signal).await?;

    spectators.shutdown();
    log!("Server shut down gracefully");

    Ok(())
}
