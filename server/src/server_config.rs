use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use common::config::{ConfigContentProvider, ConfigManager, Validate};
use common::engine::session::SpectatorConfig;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Seeds the store with demo accounts and scores on startup.
    pub mock_data: bool,
    pub spectators: SpectatorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            mock_data: true,
            spectators: SpectatorConfig::default(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.bind_address
            .parse::<SocketAddr>()
            .map_err(|e| format!("Invalid bind_address '{}': {}", self.bind_address, e))?;
        self.spectators.validate()
    }
}

/// Loads the stored config, applies the command-line bind address and, with
/// `save`, writes the effective config back to the provider.
pub fn load_server_config<P: ConfigContentProvider>(
    manager: &ConfigManager<P, ServerConfig>,
    bind_address: Option<String>,
    save: bool,
) -> Result<ServerConfig, String> {
    let mut config = manager.get_config()?;
    if let Some(bind_address) = bind_address {
        config.bind_address = bind_address;
    }
    config.validate()?;
    if save {
        manager.set_config(&config)?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{MemoryContentConfigProvider, YamlConfigSerializer};

    fn manager(content: Option<&str>) -> ConfigManager<MemoryContentConfigProvider, ServerConfig> {
        ConfigManager::new(
            MemoryContentConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = manager(None).get_config().unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.spectators.players, 5);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "bind_address: 127.0.0.1:9100\nspectators:\n  players: 2\n  tick_interval_ms: null\n";
        let config = manager(Some(yaml)).get_config().unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9100");
        assert!(config.mock_data);
        assert_eq!(config.spectators.players, 2);
        assert_eq!(config.spectators.tick_interval_ms, None);
    }

    #[test]
    fn test_invalid_bind_address_rejected() {
        let result = manager(Some("bind_address: not-an-address\n")).get_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_applies_bind_address_override() {
        let config = load_server_config(&manager(None), Some("127.0.0.1:9200".to_string()), false).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9200");
        assert!(load_server_config(&manager(None), Some("nowhere".to_string()), false).is_err());
    }

    #[test]
    fn test_save_writes_effective_config() {
        let provider = MemoryContentConfigProvider::default();
        let manager = ConfigManager::new(provider.clone(), YamlConfigSerializer::new());
        let config = load_server_config(&manager, Some("127.0.0.1:9300".to_string()), true).unwrap();

        let stored = provider.get_config_content().unwrap().unwrap();
        assert!(stored.contains("127.0.0.1:9300"));

        let reloaded: ConfigManager<_, ServerConfig> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        assert_eq!(reloaded.get_config().unwrap(), config);
    }

    #[test]
    fn test_without_save_nothing_is_written() {
        let provider = MemoryContentConfigProvider::default();
        let manager = ConfigManager::new(provider.clone(), YamlConfigSerializer::new());
        load_server_config(&manager, None, false).unwrap();
        assert_eq!(provider.get_config_content().unwrap(), None);
    }
}
