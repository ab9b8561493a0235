//! Client side of the auth, leaderboard and spectate services.

mod backend;
mod http;
mod memory;
mod store;
mod submitter;
mod types;

use std::future::Future;

use crate::PlayerId;
use crate::engine::snake::GameMode;

pub use backend::{ApiBackend, BackendConfig, BackendMode};
pub use http::HttpApi;
pub use memory::InMemoryApi;
pub use store::{
    EMAIL_TAKEN, INVALID_PASSWORD, MOCK_PASSWORD, MUST_BE_LOGGED_IN, NOT_LOGGED_IN,
    PLAYER_NOT_FOUND, ShowdownStore, USER_NOT_FOUND, USERNAME_TAKEN, today,
};
pub use submitter::LeaderboardSubmitter;
pub use types::{
    ActivePlayersResponse, AuthResponse, LeaderboardEntry, LeaderboardQuery, LeaderboardResponse,
    LoginRequest, LogoutResponse, PlayerStateResponse, SignupRequest, SubmitScoreRequest,
    SubmitScoreResponse, User,
};

/// Failures come back inside the response (`success: false` plus `error`),
/// never as a panic or a transport error.
pub trait ShowdownApi: Send + Sync + Clone + 'static {
    fn login(&self, email: &str, password: &str) -> impl Future<Output = AuthResponse> + Send;

    fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = AuthResponse> + Send;

    fn logout(&self) -> impl Future<Output = LogoutResponse> + Send;

    fn current_user(&self) -> impl Future<Output = AuthResponse> + Send;

    fn leaderboard(
        &self,
        game_mode: Option<GameMode>,
    ) -> impl Future<Output = LeaderboardResponse> + Send;

    /// Recorded under the logged-in user.
    fn submit_score(
        &self,
        score: u32,
        game_mode: GameMode,
    ) -> impl Future<Output = SubmitScoreResponse> + Send;

    fn active_players(&self) -> impl Future<Output = ActivePlayersResponse> + Send;

    fn player_state(&self, id: &PlayerId) -> impl Future<Output = PlayerStateResponse> + Send;
}
