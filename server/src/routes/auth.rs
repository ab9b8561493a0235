use axum::{Json, extract::State, http::HeaderMap};

use common::api::{AuthResponse, LoginRequest, LogoutResponse, NOT_LOGGED_IN, SignupRequest};
use common::log;

use super::bearer_token;
use crate::web_server::WebServerState;

pub async fn login(
    State(state): State<WebServerState>,
    Json(request): Json<LoginRequest>,
) -> Json<AuthResponse> {
    let mut store = state.store.lock().await;
    match store.login(&request.email, &request.password) {
        Ok(user) => {
            let token = store.issue_token(&user);
            log!("{} logged in", user.username);
            Json(AuthResponse::authenticated(user, Some(token)))
        }
        Err(error) => Json(AuthResponse::error(error)),
    }
}

pub async fn signup(
    State(state): State<WebServerState>,
    Json(request): Json<SignupRequest>,
) -> Json<AuthResponse> {
    let mut store = state.store.lock().await;
    match store.signup(&request.username, &request.email, &request.password) {
        Ok(user) => {
            let token = store.issue_token(&user);
            log!("{} signed up", user.username);
            Json(AuthResponse::authenticated(user, Some(token)))
        }
        Err(error) => Json(AuthResponse::error(error)),
    }
}

pub async fn logout(State(state): State<WebServerState>, headers: HeaderMap) -> Json<LogoutResponse> {
    if let Some(token) = bearer_token(&headers) {
        state.store.lock().await.revoke_token(&token);
    }
    Json(LogoutResponse { success: true })
}

pub async fn me(State(state): State<WebServerState>, headers: HeaderMap) -> Json<AuthResponse> {
    let user = match bearer_token(&headers) {
        Some(token) => state.store.lock().await.user_for_token(&token),
        None => None,
    };
    match user {
        Some(user) => Json(AuthResponse::authenticated(user, None)),
        None => Json(AuthResponse::error(NOT_LOGGED_IN)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::auth_headers;
    use common::api::{EMAIL_TAKEN, INVALID_PASSWORD, ShowdownStore, USER_NOT_FOUND};
    use common::engine::session::SpectatorPool;

    fn state() -> WebServerState {
        WebServerState::new(ShowdownStore::with_mock_data(), SpectatorPool::empty())
    }

    fn login_request(email: &str, password: &str) -> Json<LoginRequest> {
        Json(LoginRequest { email: email.to_string(), password: password.to_string() })
    }

    #[tokio::test]
    async fn test_signup_login_flow() {
        let state = state();
        let signup_request = SignupRequest {
            username: "TestUser".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };

        let Json(created) = signup(State(state.clone()), Json(signup_request.clone())).await;
        assert!(created.success);
        assert_eq!(created.user.as_ref().map(|u| u.email.as_str()), Some("test@example.com"));

        let Json(again) = signup(State(state.clone()), Json(signup_request)).await;
        assert_eq!(again.error.as_deref(), Some(EMAIL_TAKEN));

        let Json(logged_in) = login(State(state.clone()), login_request("test@example.com", "password123")).await;
        assert!(logged_in.success);
        assert_eq!(logged_in.user.map(|u| u.username), Some("TestUser".to_string()));

        let Json(wrong) = login(State(state.clone()), login_request("test@example.com", "wrong")).await;
        assert!(!wrong.success);
        assert_eq!(wrong.error.as_deref(), Some(INVALID_PASSWORD));

        let Json(unknown) = login(State(state), login_request("ghost@example.com", "password123")).await;
        assert_eq!(unknown.error.as_deref(), Some(USER_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_me_follows_token() {
        let state = state();
        let Json(logged_in) = login(State(state.clone()), login_request("neon@game.com", "password123")).await;
        let token = logged_in.token.unwrap();

        let Json(current) = me(State(state.clone()), auth_headers(&token)).await;
        assert_eq!(current.user.map(|u| u.username), Some("NeonPlayer".to_string()));

        let Json(anonymous) = me(State(state.clone()), HeaderMap::new()).await;
        assert_eq!(anonymous.error.as_deref(), Some(NOT_LOGGED_IN));

        let Json(logged_out) = logout(State(state.clone()), auth_headers(&token)).await;
        assert!(logged_out.success);

        let Json(after) = me(State(state), auth_headers(&token)).await;
        assert!(!after.success);
    }
}
