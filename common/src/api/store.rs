//! In-memory accounts, bearer sessions and leaderboard.

use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::engine::snake::{FOOD_SCORE, GameMode};
use crate::id_generator::generate_token;
use crate::{AuthToken, EntryId, UserId};
use super::types::{LeaderboardEntry, User};

pub const USER_NOT_FOUND: &str = "User not found. Please sign up first.";
pub const INVALID_PASSWORD: &str = "Invalid password.";
pub const EMAIL_TAKEN: &str = "Email already registered.";
pub const USERNAME_TAKEN: &str = "Username already taken.";
pub const NOT_LOGGED_IN: &str = "Not logged in";
pub const MUST_BE_LOGGED_IN: &str = "Must be logged in to submit score";
pub const PLAYER_NOT_FOUND: &str = "Player not found or no longer playing";

pub const MOCK_PASSWORD: &str = "password123";
const MIN_PASSWORD_LEN: usize = 6;

const MOCK_USERS: [(&str, &str, (i32, u32, u32, u32, u32)); 15] = [
    ("SnakeMaster", "snake@game.com", (2024, 1, 15, 10, 0)),
    ("RetroGamer", "retro@game.com", (2024, 2, 20, 14, 30)),
    ("PixelKing", "pixel@game.com", (2024, 3, 10, 9, 15)),
    ("ArcadeQueen", "arcade@game.com", (2024, 3, 25, 16, 45)),
    ("NeonPlayer", "neon@game.com", (2024, 4, 1, 11, 20)),
    ("GameWizard", "wizard@game.com", (2024, 4, 15, 8, 30)),
    ("SnakeCharmer", "charmer@game.com", (2024, 5, 1, 13, 45)),
    ("ByteBiter", "byte@game.com", (2024, 5, 20, 16, 10)),
    ("CobraKid", "cobra@game.com", (2024, 6, 5, 9, 25)),
    ("VenomViper", "venom@game.com", (2024, 6, 18, 14, 50)),
    ("PythonPro", "python@game.com", (2024, 7, 2, 11, 15)),
    ("AnacondaAce", "anaconda@game.com", (2024, 7, 15, 15, 30)),
    ("SerpentSlayer", "serpent@game.com", (2024, 8, 1, 10, 40)),
    ("ViperVictory", "viper@game.com", (2024, 8, 20, 12, 55)),
    ("RattlerRuler", "rattler@game.com", (2024, 9, 5, 9, 5)),
];

const MOCK_SCORES: [(&str, u32, GameMode, u32); 15] = [
    ("SnakeMaster", 2450, GameMode::Walls, 27),
    ("PixelKing", 2180, GameMode::PassThrough, 26),
    ("RetroGamer", 1950, GameMode::Walls, 28),
    ("ArcadeQueen", 1820, GameMode::PassThrough, 25),
    ("NeonPlayer", 1650, GameMode::Walls, 27),
    ("GameWizard", 1480, GameMode::PassThrough, 24),
    ("SnakeCharmer", 1320, GameMode::Walls, 23),
    ("ByteBiter", 1150, GameMode::PassThrough, 22),
    ("CobraKid", 980, GameMode::Walls, 21),
    ("VenomViper", 850, GameMode::PassThrough, 20),
    ("PythonPro", 720, GameMode::Walls, 19),
    ("AnacondaAce", 650, GameMode::PassThrough, 18),
    ("SerpentSlayer", 580, GameMode::Walls, 17),
    ("ViperVictory", 520, GameMode::PassThrough, 16),
    ("RattlerRuler", 450, GameMode::Walls, 15),
];

struct Account {
    user: User,
    password: String,
}

/// Accounts are keyed by email. Leaderboard entries are kept sorted by score.
#[derive(Default)]
pub struct ShowdownStore {
    accounts: HashMap<String, Account>,
    leaderboard: Vec<LeaderboardEntry>,
    sessions: HashMap<AuthToken, String>,
    next_user: u64,
    next_entry: u64,
}

impl ShowdownStore {
    pub fn new() -> Self {
        Self {
            next_user: 1,
            next_entry: 1,
            ..Self::default()
        }
    }

    /// Seeded with fifteen demo accounts (password `password123`) and their scores.
    pub fn with_mock_data() -> Self {
        let mut store = Self::new();

        for (index, (username, email, (year, month, day, hour, minute))) in MOCK_USERS.into_iter().enumerate() {
            let user = User {
                id: UserId::new((index + 1).to_string()),
                username: username.to_string(),
                email: email.to_string(),
                created_at: Utc
                    .with_ymd_and_hms(year, month, day, hour, minute, 0)
                    .single()
                    .unwrap_or_default(),
            };
            store.accounts.insert(
                email.to_string(),
                Account { user, password: MOCK_PASSWORD.to_string() },
            );
        }

        for (index, (username, score, game_mode, day)) in MOCK_SCORES.into_iter().enumerate() {
            store.leaderboard.push(LeaderboardEntry {
                id: EntryId::new((index + 1).to_string()),
                rank: 0,
                username: username.to_string(),
                score,
                game_mode,
                date: NaiveDate::from_ymd_opt(2024, 11, day).unwrap_or_default(),
            });
        }

        store.next_user = MOCK_USERS.len() as u64 + 1;
        store.next_entry = MOCK_SCORES.len() as u64 + 1;
        store.rerank();
        store
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn user_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User, String> {
        let account = self.accounts.get(email.trim()).ok_or_else(|| USER_NOT_FOUND.to_string())?;
        if account.password != password {
            return Err(INVALID_PASSWORD.to_string());
        }
        Ok(account.user.clone())
    }

    pub fn signup(&mut self, username: &str, email: &str, password: &str) -> Result<User, String> {
        let username = username.trim();
        let email = email.trim();

        if username.is_empty() {
            return Err("Username is required.".to_string());
        }
        if !is_plausible_email(email) {
            return Err("Invalid email address.".to_string());
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(format!("Password must be at least {} characters.", MIN_PASSWORD_LEN));
        }
        if self.accounts.contains_key(email) {
            return Err(EMAIL_TAKEN.to_string());
        }
        let lowered = username.to_lowercase();
        if self.accounts.values().any(|a| a.user.username.to_lowercase() == lowered) {
            return Err(USERNAME_TAKEN.to_string());
        }

        let user = User {
            id: UserId::new(format!("user-{}", self.next_user)),
            username: username.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        self.next_user += 1;
        self.accounts.insert(
            email.to_string(),
            Account { user: user.clone(), password: password.to_string() },
        );
        Ok(user)
    }

    pub fn issue_token(&mut self, user: &User) -> AuthToken {
        let token = AuthToken::new(generate_token());
        self.sessions.insert(token.clone(), user.email.clone());
        token
    }

    pub fn user_for_token(&self, token: &AuthToken) -> Option<User> {
        let email = self.sessions.get(token)?;
        self.accounts.get(email).map(|account| account.user.clone())
    }

    pub fn revoke_token(&mut self, token: &AuthToken) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Entries ranked from 1, optionally restricted to one mode.
    pub fn leaderboard(&self, game_mode: Option<GameMode>) -> Vec<LeaderboardEntry> {
        self.leaderboard
            .iter()
            .filter(|entry| game_mode.is_none_or(|mode| entry.game_mode == mode))
            .enumerate()
            .map(|(index, entry)| LeaderboardEntry {
                rank: index as u32 + 1,
                ..entry.clone()
            })
            .collect()
    }

    /// Records a score and returns the entry with its overall rank.
    pub fn submit_score(
        &mut self,
        username: &str,
        score: u32,
        game_mode: GameMode,
        date: NaiveDate,
    ) -> Result<LeaderboardEntry, String> {
        if score % FOOD_SCORE != 0 {
            return Err(format!("Score must be a multiple of {}.", FOOD_SCORE));
        }

        let id = EntryId::new(format!("entry-{}", self.next_entry));
        self.next_entry += 1;
        self.leaderboard.push(LeaderboardEntry {
            id: id.clone(),
            rank: 0,
            username: username.to_string(),
            score,
            game_mode,
            date,
        });
        self.rerank();

        self.leaderboard
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or_else(|| "Entry vanished after insert".to_string())
    }

    fn rerank(&mut self) {
        self.leaderboard.sort_by(|a, b| b.score.cmp(&a.score));
        for (index, entry) in self.leaderboard.iter_mut().enumerate() {
            entry.rank = index as u32 + 1;
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap()
    }

    #[test]
    fn test_mock_login() {
        let store = ShowdownStore::with_mock_data();
        let user = store.login("snake@game.com", MOCK_PASSWORD).unwrap();
        assert_eq!(user.username, "SnakeMaster");
        assert_eq!(user.id, UserId::from("1"));
        assert_eq!(store.user_count(), 15);
    }

    #[test]
    fn test_login_errors() {
        let store = ShowdownStore::with_mock_data();
        assert_eq!(store.login("nobody@game.com", "x"), Err(USER_NOT_FOUND.to_string()));
        assert_eq!(store.login("snake@game.com", "wrong"), Err(INVALID_PASSWORD.to_string()));
    }

    #[test]
    fn test_signup_then_login() {
        let mut store = ShowdownStore::with_mock_data();
        let user = store.signup("NewSnake", "new@game.com", "secret99").unwrap();
        assert_eq!(user.username, "NewSnake");
        assert_eq!(user.id, UserId::from("user-16"));
        assert_eq!(store.login("new@game.com", "secret99"), Ok(user));
    }

    #[test]
    fn test_login_ignores_surrounding_whitespace_in_email() {
        let mut store = ShowdownStore::new();
        let user = store.signup("Spacey", " spacey@game.com ", "secret99").unwrap();
        assert_eq!(user.email, "spacey@game.com");
        assert_eq!(store.login(" spacey@game.com ", "secret99"), Ok(user.clone()));
        assert_eq!(store.login("spacey@game.com", "secret99"), Ok(user));
    }

    #[test]
    fn test_signup_conflicts() {
        let mut store = ShowdownStore::with_mock_data();
        assert_eq!(
            store.signup("Someone", "snake@game.com", "secret99"),
            Err(EMAIL_TAKEN.to_string())
        );
        assert_eq!(
            store.signup("snakemaster", "fresh@game.com", "secret99"),
            Err(USERNAME_TAKEN.to_string())
        );
    }

    #[test]
    fn test_signup_validation() {
        let mut store = ShowdownStore::new();
        assert!(store.signup("  ", "a@b.com", "secret99").is_err());
        assert!(store.signup("Name", "not-an-email", "secret99").is_err());
        assert!(store.signup("Name", "a@b.com", "123").is_err());
        assert!(store.signup("Name", "a@b.com", "123456").is_ok());
    }

    #[test]
    fn test_tokens() {
        let mut store = ShowdownStore::with_mock_data();
        let user = store.login("retro@game.com", MOCK_PASSWORD).unwrap();
        let token = store.issue_token(&user);

        assert_eq!(store.user_for_token(&token), Some(user));
        assert!(store.revoke_token(&token));
        assert_eq!(store.user_for_token(&token), None);
        assert!(!store.revoke_token(&token));
    }

    #[test]
    fn test_leaderboard_filters_and_reranks() {
        let store = ShowdownStore::with_mock_data();

        let all = store.leaderboard(None);
        assert_eq!(all.len(), 15);
        assert_eq!(all[0].username, "SnakeMaster");
        assert_eq!(all[0].rank, 1);

        let pass_through = store.leaderboard(Some(GameMode::PassThrough));
        assert_eq!(pass_through.len(), 7);
        assert_eq!(pass_through[0].username, "PixelKing");
        assert_eq!(pass_through[0].rank, 1);
        assert_eq!(pass_through[6].rank, 7);
        assert!(pass_through.windows(2).all(|w| w[0].score >= w[1].score));

        let walls = store.leaderboard(Some(GameMode::Walls));
        assert_eq!(walls.len(), 8);
        assert_eq!(walls[1].username, "RetroGamer");
        assert_eq!(walls[1].rank, 2);
    }

    #[test]
    fn test_submit_score_ranks_entry() {
        let mut store = ShowdownStore::with_mock_data();
        let entry = store.submit_score("CobraKid", 2000, GameMode::Walls, date(1)).unwrap();

        assert_eq!(entry.rank, 3);
        assert_eq!(entry.id, EntryId::from("entry-16"));
        let all = store.leaderboard(None);
        assert_eq!(all.len(), 16);
        assert_eq!(all[2].id, entry.id);
        assert_eq!(all[3].username, "RetroGamer");
        assert_eq!(all[3].rank, 4);
    }

    #[test]
    fn test_submit_score_rejects_impossible_score() {
        let mut store = ShowdownStore::new();
        assert!(store.submit_score("Anyone", 15, GameMode::Walls, date(2)).is_err());
        assert!(store.leaderboard(None).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = ShowdownStore::with_mock_data();
        store.clear();
        assert_eq!(store.user_count(), 0);
        assert!(store.leaderboard(None).is_empty());
    }
}
