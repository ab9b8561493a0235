//! Autonomous players that keep playing in the background so there is always
//! something to watch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::config::Validate;
use crate::engine::SessionRng;
use crate::engine::snake::{BotController, GameMode, GameState};
use crate::id_generator::generate_player_name;
use crate::{PlayerId, log, log_debug};

const MAX_PLAYERS: usize = 64;
const MIN_TICK_INTERVAL_MS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePlayer {
    pub id: PlayerId,
    pub username: String,
    pub game_state: GameState,
    pub started_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectatorConfig {
    pub players: usize,
    /// Names for the first players; the rest get generated names.
    pub usernames: Vec<String>,
    /// Fixed cadence for every player. Unset means each game ticks at its own speed.
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl Default for SpectatorConfig {
    fn default() -> Self {
        Self {
            players: 5,
            usernames: vec![
                "LiveSnaker".to_string(),
                "ProGamer99".to_string(),
                "SnakeEnthusiast".to_string(),
                "QuickSlither".to_string(),
                "MegaSnake".to_string(),
            ],
            tick_interval_ms: Some(200),
            seed: None,
        }
    }
}

impl Validate for SpectatorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.players > MAX_PLAYERS {
            return Err(format!("players must be at most {}", MAX_PLAYERS));
        }
        if let Some(interval) = self.tick_interval_ms
            && interval < MIN_TICK_INTERVAL_MS
        {
            return Err(format!("tick_interval_ms must be at least {}", MIN_TICK_INTERVAL_MS));
        }
        if self.usernames.iter().any(|name| name.trim().is_empty()) {
            return Err("usernames must not be empty".to_string());
        }
        Ok(())
    }
}

/// Ticks one autonomous game. A finished game is replaced with a fresh one in
/// the same mode; the second value reports that restart.
pub fn next_autonomous_state(state: &GameState, rng: &mut SessionRng) -> (GameState, bool) {
    if state.is_game_over {
        return (GameState::new(state.game_mode, rng), true);
    }
    (BotController::advance(state, rng), false)
}

/// Fixed set of autonomous players, each driven by its own task.
///
/// The task is the only writer of its player; readers get clones.
#[derive(Clone)]
pub struct SpectatorPool {
    players: Arc<Vec<Arc<Mutex<ActivePlayer>>>>,
    tasks: Arc<std::sync::Mutex<Vec<JoinHandle<()>>>>,
}

impl SpectatorPool {
    pub fn empty() -> Self {
        Self {
            players: Arc::new(Vec::new()),
            tasks: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn spawn(config: &SpectatorConfig) -> Self {
        let mut seeder = match config.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        let fixed_interval = config.tick_interval_ms.map(Duration::from_millis);

        let mut players = Vec::with_capacity(config.players);
        let mut tasks = Vec::with_capacity(config.players);

        for index in 0..config.players {
            let game_mode = if index % 2 == 0 { GameMode::Walls } else { GameMode::PassThrough };
            let username = config
                .usernames
                .get(index)
                .cloned()
                .unwrap_or_else(generate_player_name);
            let mut rng = SessionRng::new(seeder.random());

            let player = Arc::new(Mutex::new(ActivePlayer {
                id: PlayerId::new(format!("active-{}", index + 1)),
                username,
                game_state: GameState::new(game_mode, &mut rng),
                started_at: Utc::now(),
            }));

            tasks.push(tokio::spawn(run_autonomous_player(player.clone(), rng, fixed_interval)));
            players.push(player);
        }

        log!("Spawned {} autonomous players", players.len());

        Self {
            players: Arc::new(players),
            tasks: Arc::new(std::sync::Mutex::new(tasks)),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub async fn active_players(&self) -> Vec<ActivePlayer> {
        let mut result = Vec::with_capacity(self.players.len());
        for player in self.players.iter() {
            result.push(player.lock().await.clone());
        }
        result
    }

    pub async fn player(&self, id: &PlayerId) -> Option<ActivePlayer> {
        for player in self.players.iter() {
            let player = player.lock().await;
            if player.id == *id {
                return Some(player.clone());
            }
        }
        None
    }

    /// Stops every player task. Snapshots stay readable.
    pub fn shutdown(&self) {
        match self.tasks.lock() {
            Ok(mut tasks) => {
                for task in tasks.drain(..) {
                    task.abort();
                }
            }
            Err(_) => log!("Spectator task list lock poisoned, tasks left running"),
        }
    }
}

async fn run_autonomous_player(
    player: Arc<Mutex<ActivePlayer>>,
    mut rng: SessionRng,
    fixed_interval: Option<Duration>,
) {
    let (mut state, id) = {
        let player = player.lock().await;
        (player.game_state.clone(), player.id.clone())
    };

    loop {
        let period = fixed_interval
            .unwrap_or_else(|| Duration::from_millis(u64::from(state.speed.max(1))));
        sleep(period).await;

        let (next, restarted) = next_autonomous_state(&state, &mut rng);
        if restarted {
            log_debug!("{} finished with {} points, restarting", id, state.score);
        }
        state = next;

        let mut player = player.lock().await;
        player.game_state = state.clone();
        if restarted {
            player.started_at = Utc::now();
        }
    }
}
