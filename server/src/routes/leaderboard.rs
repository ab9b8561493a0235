use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};

use common::api::{
    LeaderboardQuery, LeaderboardResponse, MUST_BE_LOGGED_IN, SubmitScoreRequest,
    SubmitScoreResponse, today,
};
use common::log;

use super::bearer_token;
use crate::web_server::WebServerState;

pub async fn get_leaderboard(
    State(state): State<WebServerState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<LeaderboardResponse> {
    Json(LeaderboardResponse::ok(state.store.lock().await.leaderboard(query.mode)))
}

pub async fn submit_score(
    State(state): State<WebServerState>,
    headers: HeaderMap,
    Json(request): Json<SubmitScoreRequest>,
) -> Json<SubmitScoreResponse> {
    let mut store = state.store.lock().await;
    let Some(user) = bearer_token(&headers).and_then(|token| store.user_for_token(&token)) else {
        return Json(SubmitScoreResponse::error(MUST_BE_LOGGED_IN));
    };

    match store.submit_score(&user.username, request.score, request.game_mode, today()) {
        Ok(entry) => {
            log!(
                "{} scored {} in {} mode, rank {}",
                user.username,
                entry.score,
                entry.game_mode.as_str(),
                entry.rank
            );
            Json(SubmitScoreResponse::ok(entry))
        }
        Err(error) => Json(SubmitScoreResponse::error(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::auth_headers;
    use common::api::{MOCK_PASSWORD, ShowdownStore};
    use common::engine::session::SpectatorPool;
    use common::engine::snake::GameMode;

    fn state() -> WebServerState {
        WebServerState::new(ShowdownStore::with_mock_data(), SpectatorPool::empty())
    }

    #[tokio::test]
    async fn test_leaderboard_sorted_and_ranked() {
        let Json(response) = get_leaderboard(State(state()), Query(LeaderboardQuery::default())).await;
        assert!(response.success);
        assert_eq!(response.entries.len(), 15);
        for (index, pair) in response.entries.windows(2).enumerate() {
            assert!(pair[0].score >= pair[1].score);
            assert_eq!(pair[0].rank, index as u32 + 1);
        }
    }

    #[tokio::test]
    async fn test_leaderboard_mode_filter() {
        let query = LeaderboardQuery { mode: Some(GameMode::PassThrough) };
        let Json(response) = get_leaderboard(State(state()), Query(query)).await;
        assert_eq!(response.entries.len(), 7);
        assert!(response.entries.iter().all(|e| e.game_mode == GameMode::PassThrough));
        assert_eq!(response.entries[0].rank, 1);
    }

    #[tokio::test]
    async fn test_submit_requires_token() {
        let request = SubmitScoreRequest { score: 100, game_mode: GameMode::Walls };
        let Json(response) = submit_score(State(state()), HeaderMap::new(), Json(request)).await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some(MUST_BE_LOGGED_IN));
    }

    #[tokio::test]
    async fn test_submit_with_token() {
        let state = state();
        let token = {
            let mut store = state.store.lock().await;
            let user = store.login("cobra@game.com", MOCK_PASSWORD).unwrap();
            store.issue_token(&user)
        };

        let request = SubmitScoreRequest { score: 1000, game_mode: GameMode::PassThrough };
        let Json(response) = submit_score(State(state.clone()), auth_headers(&token), Json(request)).await;
        let entry = response.entry.unwrap();
        assert_eq!(entry.username, "CobraKid");
        assert_eq!(entry.rank, 9);

        let query = LeaderboardQuery { mode: Some(GameMode::PassThrough) };
        let Json(board) = get_leaderboard(State(state), Query(query)).await;
        assert_eq!(board.entries.len(), 8);
        assert_eq!(board.entries[4].username, "CobraKid");
    }
}
