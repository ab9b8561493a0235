use std::sync::Arc;

use tokio::sync::Mutex;

use crate::PlayerId;
use crate::engine::session::SpectatorPool;
use crate::engine::snake::GameMode;
use super::ShowdownApi;
use super::store::{MUST_BE_LOGGED_IN, NOT_LOGGED_IN, PLAYER_NOT_FOUND, ShowdownStore, today};
use super::types::{
    ActivePlayersResponse, AuthResponse, LeaderboardResponse, LogoutResponse, PlayerStateResponse,
    SubmitScoreResponse, User,
};

/// Talks to a store in the same process. The logged-in user lives on the
/// handle, shared by its clones.
#[derive(Clone)]
pub struct InMemoryApi {
    store: Arc<Mutex<ShowdownStore>>,
    current: Arc<Mutex<Option<User>>>,
    spectators: SpectatorPool,
}

impl InMemoryApi {
    pub fn new(store: ShowdownStore, spectators: SpectatorPool) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            current: Arc::new(Mutex::new(None)),
            spectators,
        }
    }

    pub fn with_mock_data() -> Self {
        Self::new(ShowdownStore::with_mock_data(), SpectatorPool::empty())
    }
}

impl ShowdownApi for InMemoryApi {
    async fn login(&self, email: &str, password: &str) -> AuthResponse {
        let result = self.store.lock().await.login(email, password);
        match result {
            Ok(user) => {
                *self.current.lock().await = Some(user.clone());
                AuthResponse::authenticated(user, None)
            }
            Err(error) => AuthResponse::error(error),
        }
    }

    async fn signup(&self, username: &str, email: &str, password: &str) -> AuthResponse {
        let result = self.store.lock().await.signup(username, email, password);
        match result {
            Ok(user) => {
                *self.current.lock().await = Some(user.clone());
                AuthResponse::authenticated(user, None)
            }
            Err(error) => AuthResponse::error(error),
        }
    }

    async fn logout(&self) -> LogoutResponse {
        *self.current.lock().await = None;
        LogoutResponse { success: true }
    }

    async fn current_user(&self) -> AuthResponse {
        match self.current.lock().await.clone() {
            Some(user) => AuthResponse::authenticated(user, None),
            None => AuthResponse::error(NOT_LOGGED_IN),
        }
    }

    async fn leaderboard(&self, game_mode: Option<GameMode>) -> LeaderboardResponse {
        LeaderboardResponse::ok(self.store.lock().await.leaderboard(game_mode))
    }

    async fn submit_score(&self, score: u32, game_mode: GameMode) -> SubmitScoreResponse {
        let Some(user) = self.current.lock().await.clone() else {
            return SubmitScoreResponse::error(MUST_BE_LOGGED_IN);
        };
        let result = self
            .store
            .lock()
            .await
            .submit_score(&user.username, score, game_mode, today());
        match result {
            Ok(entry) => SubmitScoreResponse::ok(entry),
            Err(error) => SubmitScoreResponse::error(error),
        }
    }

    async fn active_players(&self) -> ActivePlayersResponse {
        ActivePlayersResponse::ok(self.spectators.active_players().await)
    }

    async fn player_state(&self, id: &PlayerId) -> PlayerStateResponse {
        match self.spectators.player(id).await {
            Some(player) => PlayerStateResponse::ok(player.game_state),
            None => PlayerStateResponse::error(PLAYER_NOT_FOUND),
        }
    }
}
