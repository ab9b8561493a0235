use axum::{
    Json,
    extract::{Path, State},
};

use common::PlayerId;
use common::api::{ActivePlayersResponse, PLAYER_NOT_FOUND, PlayerStateResponse};

use crate::web_server::WebServerState;

pub async fn active_players(State(state): State<WebServerState>) -> Json<ActivePlayersResponse> {
    Json(ActivePlayersResponse::ok(state.spectators.active_players().await))
}

pub async fn player_state(
    State(state): State<WebServerState>,
    Path(player_id): Path<String>,
) -> Json<PlayerStateResponse> {
    match state.spectators.player(&PlayerId::new(player_id)).await {
        Some(player) => Json(PlayerStateResponse::ok(player.game_state)),
        None => Json(PlayerStateResponse::error(PLAYER_NOT_FOUND)),
    }
}
