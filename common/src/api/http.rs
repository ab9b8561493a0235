use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, Request};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::engine::snake::GameMode;
use crate::{AuthToken, PlayerId, log_debug};
use super::ShowdownApi;
use super::types::{
    ActivePlayersResponse, AuthResponse, LeaderboardResponse, LoginRequest, LogoutResponse,
    PlayerStateResponse, SignupRequest, SubmitScoreRequest, SubmitScoreResponse,
};

/// JSON-over-HTTP client for a remote showdown server.
///
/// The bearer token handed out at login is kept on the handle and sent with
/// every later request.
#[derive(Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client<HttpConnector, Full<Bytes>>,
    token: Arc<Mutex<Option<AuthToken>>>,
    timeout: Duration,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(90))
            .build(connector);

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            token: Arc::new(Mutex::new(None)),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Vec<u8>,
    ) -> Result<T, String> {
        let uri = format!("{}{}", self.base_url, path);
        let token = self.token.lock().await.clone();

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(uri.as_str())
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| format!("Invalid request to {}: {}", uri, e))?;

        log_debug!("{} {}", method, uri);

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| format!("Request to {} timed out", uri))?
            .map_err(|e| format!("Request to {} failed: {}", uri, e))?;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| format!("Failed to read response from {}: {}", uri, e))?
            .to_bytes();

        serde_json::from_slice(&bytes)
            .map_err(|e| format!("Unexpected response from {} ({}): {}", uri, status, e))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        self.send(Method::GET, path, Vec::new()).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, String> {
        let body = serde_json::to_vec(body).map_err(|e| format!("Failed to encode request: {}", e))?;
        self.send(Method::POST, path, body).await
    }

    async fn remember_token(&self, response: &AuthResponse) {
        if response.success
            && let Some(token) = &response.token
        {
            *self.token.lock().await = Some(token.clone());
        }
    }
}

impl ShowdownApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> AuthResponse {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self
            .post("/auth/login", &request)
            .await
            .unwrap_or_else(AuthResponse::error);
        self.remember_token(&response).await;
        response
    }

    async fn signup(&self, username: &str, email: &str, password: &str) -> AuthResponse {
        let request = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self
            .post("/auth/signup", &request)
            .await
            .unwrap_or_else(AuthResponse::error);
        self.remember_token(&response).await;
        response
    }

    async fn logout(&self) -> LogoutResponse {
        let response = self
            .post("/auth/logout", &serde_json::json!({}))
            .await
            .unwrap_or(LogoutResponse { success: false });
        *self.token.lock().await = None;
        response
    }

    async fn current_user(&self) -> AuthResponse {
        self.get("/auth/me").await.unwrap_or_else(AuthResponse::error)
    }

    async fn leaderboard(&self, game_mode: Option<GameMode>) -> LeaderboardResponse {
        let path = match game_mode {
            Some(mode) => format!("/leaderboard?mode={}", mode.as_str()),
            None => "/leaderboard".to_string(),
        };
        self.get(&path).await.unwrap_or_else(LeaderboardResponse::error)
    }

    async fn submit_score(&self, score: u32, game_mode: GameMode) -> SubmitScoreResponse {
        let request = SubmitScoreRequest { score, game_mode };
        self.post("/leaderboard", &request)
            .await
            .unwrap_or_else(SubmitScoreResponse::error)
    }

    async fn active_players(&self) -> ActivePlayersResponse {
        self.get("/spectate/active")
            .await
            .unwrap_or_else(ActivePlayersResponse::error)
    }

    async fn player_state(&self, id: &PlayerId) -> PlayerStateResponse {
        self.get(&format!("/spectate/{}", id))
            .await
            .unwrap_or_else(PlayerStateResponse::error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_base_url_trailing_slash_trimmed() {
        let api = HttpApi::new("http://127.0.0.1:8000/", Duration::from_secs(1));
        assert_eq!(api.base_url(), "http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_error() {
        // Port 9 (discard) is essentially never served on loopback.
        let api = HttpApi::new("http://127.0.0.1:9", Duration::from_secs(2));
        let response = api.login("snake@game.com", "password123").await;
        assert!(!response.success);
        assert!(response.error.is_some());

        let board = api.leaderboard(None).await;
        assert!(!board.success);
        assert!(board.entries.is_empty());
    }
}
