pub mod auth;
pub mod leaderboard;
pub mod spectate;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use common::AuthToken;

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<AuthToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(AuthToken::from(token))
}

#[cfg(test)]
pub(crate) fn auth_headers(token: &AuthToken) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        let token = AuthToken::from("abc123");
        assert_eq!(bearer_token(&auth_headers(&token)), Some(token));
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut basic = HeaderMap::new();
        basic.insert(AUTHORIZATION, "Basic Zm9vOmJhcg==".parse().unwrap());
        assert_eq!(bearer_token(&basic), None);
    }
}
