//! JSON bodies exchanged with the collaborator services.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::session::ActivePlayer;
use crate::engine::snake::{GameMode, GameState};
use crate::{AuthToken, EntryId, UserId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: EntryId,
    pub rank: u32,
    pub username: String,
    pub score: u32,
    pub game_mode: GameMode,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub score: u32,
    pub game_mode: GameMode,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub mode: Option<GameMode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<AuthToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthResponse {
    pub fn authenticated(user: User, token: Option<AuthToken>) -> Self {
        Self { success: true, user: Some(user), token, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, user: None, token: None, error: Some(message.into()) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub success: bool,
    #[serde(default)]
    pub entries: Vec<LeaderboardEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LeaderboardResponse {
    pub fn ok(entries: Vec<LeaderboardEntry>) -> Self {
        Self { success: true, entries, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, entries: Vec::new(), error: Some(message.into()) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<LeaderboardEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitScoreResponse {
    pub fn ok(entry: LeaderboardEntry) -> Self {
        Self { success: true, entry: Some(entry), error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, entry: None, error: Some(message.into()) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePlayersResponse {
    pub success: bool,
    #[serde(default)]
    pub players: Vec<ActivePlayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActivePlayersResponse {
    pub fn ok(players: Vec<ActivePlayer>) -> Self {
        Self { success: true, players, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, players: Vec::new(), error: Some(message.into()) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlayerStateResponse {
    pub fn ok(game_state: GameState) -> Self {
        Self { success: true, game_state: Some(game_state), error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, game_state: None, error: Some(message.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_omits_empty_fields() {
        let json = serde_json::to_string(&AuthResponse::error("Invalid password.")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"Invalid password."}"#);
    }

    #[test]
    fn test_entry_wire_format() {
        let entry = LeaderboardEntry {
            id: EntryId::from("7"),
            rank: 3,
            username: "SnakeCharmer".to_string(),
            score: 1320,
            game_mode: GameMode::Walls,
            date: NaiveDate::from_ymd_opt(2024, 11, 23).unwrap(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["gameMode"], "walls");
        assert_eq!(json["date"], "2024-11-23");
        assert_eq!(json["id"], "7");
    }

    #[test]
    fn test_submit_request_reads_camel_case() {
        let request: SubmitScoreRequest =
            serde_json::from_str(r#"{"score":120,"gameMode":"pass-through"}"#).unwrap();
        assert_eq!(request.score, 120);
        assert_eq!(request.game_mode, GameMode::PassThrough);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let response: LeaderboardResponse =
            serde_json::from_str(r#"{"success":false,"error":"down"}"#).unwrap();
        assert!(response.entries.is_empty());
        assert_eq!(response.error.as_deref(), Some("down"));
    }
}
