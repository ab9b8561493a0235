use std::future::Future;
use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use common::api::ShowdownStore;
use common::engine::session::SpectatorPool;
use common::log;

use crate::routes::{auth, leaderboard, spectate};

pub const WELCOME_MESSAGE: &str = "Welcome to Snake Showdown API";

#[derive(Clone)]
pub struct WebServerState {
    pub store: Arc<Mutex<ShowdownStore>>,
    pub spectators: SpectatorPool,
}

impl WebServerState {
    pub fn new(store: ShowdownStore, spectators: SpectatorPool) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            spectators,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

pub fn build_router(state: WebServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(welcome))
        .route("/auth/login", post(auth::login))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route(
            "/leaderboard",
            get(leaderboard::get_leaderboard).post(leaderboard::submit_score),
        )
        .route("/spectate/active", get(spectate::active_players))
        .route("/spectate/{player_id}", get(spectate::player_state))
        .layer(cors)
        .with_state(state)
}

pub async fn run_web_server(
    bind_address: &str,
    state: WebServerState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(|e| format!("Failed to bind web server to {}: {}", bind_address, e))?;
    log!("Web server listening on {}", bind_address);
    serve(listener, state, shutdown_signal).await
}

pub async fn serve(
    listener: TcpListener,
    state: WebServerState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Web server error: {}", e))
}

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}
