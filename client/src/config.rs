use std::path::PathBuf;

pub(crate) use common::config::{
    ConfigContentProvider, ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use common::api::BackendConfig;
use common::engine::snake::GameMode;
use serde::{Deserialize, Serialize};

pub fn get_config_manager(
    path: impl Into<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

/// Command-line values that take precedence over the stored config.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub games: Option<u32>,
    pub pass_through: bool,
}

/// Loads the stored config, applies `overrides` and, with `save`, writes the
/// effective config back to the provider.
pub fn load_config<P: ConfigContentProvider>(
    manager: &ConfigManager<P, Config>,
    overrides: Overrides,
    save: bool,
) -> Result<Config, String> {
    let mut config = manager.get_config()?;
    if let Some(games) = overrides.games {
        config.game.games = games;
    }
    if overrides.pass_through {
        config.game.mode = GameMode::PassThrough;
    }
    config.validate()?;
    if save {
        manager.set_config(&config)?;
    }
    Ok(config)
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub account: AccountConfig,
    pub game: GameConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.backend.validate()?;
        self.account.validate()?;
        self.game.validate()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AccountConfig {
    pub email: String,
    pub password: String,
    /// When set, an unknown email is registered under this name.
    pub username: Option<String>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            email: "snake@game.com".to_string(),
            password: "password123".to_string(),
            username: None,
        }
    }
}

impl Validate for AccountConfig {
    fn validate(&self) -> Result<(), String> {
        if self.email.is_empty() {
            return Err("account email must not be empty".to_string());
        }
        if self.password.is_empty() {
            return Err("account password must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub games: u32,
    pub poll_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Walls,
            games: 3,
            poll_interval_ms: 10,
            seed: None,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.games == 0 {
            return Err("games must be greater than 0".to_string());
        }
        if self.games > 1000 {
            return Err("games must not exceed 1000".to_string());
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".to_string());
        }
        if self.poll_interval_ms > 50 {
            return Err("poll_interval_ms must not exceed 50".to_string());
        }
        Ok(())
    }
}
