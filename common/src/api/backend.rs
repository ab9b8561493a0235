use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::PlayerId;
use crate::config::Validate;
use crate::engine::session::SpectatorPool;
use crate::engine::snake::GameMode;
use super::ShowdownApi;
use super::http::HttpApi;
use super::memory::InMemoryApi;
use super::store::ShowdownStore;
use super::types::{
    ActivePlayersResponse, AuthResponse, LeaderboardResponse, LogoutResponse, PlayerStateResponse,
    SubmitScoreResponse,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendMode {
    #[default]
    InMemory,
    Http,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub mode: BackendMode,
    pub base_url: String,
    pub timeout_ms: u64,
    /// Seeds the in-memory store with demo accounts and scores.
    pub mock_data: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::InMemory,
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_ms: 5000,
            mock_data: true,
        }
    }
}

impl Validate for BackendConfig {
    fn validate(&self) -> Result<(), String> {
        if self.mode == BackendMode::Http {
            if !self.base_url.starts_with("http://") {
                return Err(format!("base_url must start with http://, got '{}'", self.base_url));
            }
            if self.timeout_ms == 0 {
                return Err("timeout_ms must be positive".to_string());
            }
        }
        Ok(())
    }
}

/// Backend chosen at startup from config.
#[derive(Clone)]
pub enum ApiBackend {
    InMemory(InMemoryApi),
    Http(HttpApi),
}

impl ApiBackend {
    pub fn from_config(config: &BackendConfig) -> Self {
        match config.mode {
            BackendMode::InMemory => {
                let store = if config.mock_data {
                    ShowdownStore::with_mock_data()
                } else {
                    ShowdownStore::new()
                };
                ApiBackend::InMemory(InMemoryApi::new(store, SpectatorPool::empty()))
            }
            BackendMode::Http => ApiBackend::Http(HttpApi::new(
                config.base_url.clone(),
                Duration::from_millis(config.timeout_ms),
            )),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ApiBackend::InMemory(_) => "in-memory".to_string(),
            ApiBackend::Http(api) => format!("http ({})", api.base_url()),
        }
    }
}

impl ShowdownApi for ApiBackend {
    async fn login(&self, email: &str, password: &str) -> AuthResponse {
        match self {
            ApiBackend::InMemory(api) => api.login(email, password).await,
            ApiBackend::Http(api) => api.login(email, password).await,
        }
    }

    async fn signup(&self, username: &str, email: &str, password: &str) -> AuthResponse {
        match self {
            ApiBackend::InMemory(api) => api.signup(username, email, password).await,
            ApiBackend::Http(api) => api.signup(username, email, password).await,
        }
    }

    async fn logout(&self) -> LogoutResponse {
        match self {
            ApiBackend::InMemory(api) => api.logout().await,
            ApiBackend::Http(api) => api.logout().await,
        }
    }

    async fn current_user(&self) -> AuthResponse {
        match self {
            ApiBackend::InMemory(api) => api.current_user().await,
            ApiBackend::Http(api) => api.current_user().await,
        }
    }

    async fn leaderboard(&self, game_mode: Option<GameMode>) -> LeaderboardResponse {
        match self {
            ApiBackend::InMemory(api) => api.leaderboard(game_mode).await,
            ApiBackend::Http(api) => api.leaderboard(game_mode).await,
        }
    }

    async fn submit_score(&self, score: u32, game_mode: GameMode) -> SubmitScoreResponse {
        match self {
            ApiBackend::InMemory(api) => api.submit_score(score, game_mode).await,
            ApiBackend::Http(api) => api.submit_score(score, game_mode).await,
        }
    }

    async fn active_players(&self) -> ActivePlayersResponse {
        match self {
            ApiBackend::InMemory(api) => api.active_players().await,
            ApiBackend::Http(api) => api.active_players().await,
        }
    }

    async fn player_state(&self, id: &PlayerId) -> PlayerStateResponse {
        match self {
            ApiBackend::InMemory(api) => api.player_state(id).await,
            ApiBackend::Http(api) => api.player_state(id).await,
        }
    }
}
