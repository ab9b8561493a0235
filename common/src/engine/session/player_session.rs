//! A single player's game, ticking on its own timer.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::engine::SessionRng;
use crate::engine::snake::{Direction, GameMode, GameState, INITIAL_DIRECTION, step};
use crate::{log, log_debug};
use super::game_over::{GameOverListener, GameOverReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Running,
    Paused,
    Over,
}

enum TickOutcome {
    Stale,
    Advanced { new_speed: Option<u32> },
    GameOver(GameOverReport),
}

struct SessionCore {
    state: GameState,
    phase: SessionPhase,
    buffered_direction: Direction,
    rng: SessionRng,
    /// Bumped whenever the current schedule must stop. Ticks carrying an older value are dropped.
    epoch: u64,
    ticks: u64,
}

impl SessionCore {
    fn new(game_mode: GameMode, mut rng: SessionRng) -> Self {
        let state = GameState {
            is_paused: true,
            ..GameState::new(game_mode, &mut rng)
        };
        Self {
            state,
            phase: SessionPhase::Idle,
            buffered_direction: INITIAL_DIRECTION,
            rng,
            epoch: 0,
            ticks: 0,
        }
    }

    /// An idle game counts as paused: it is not ticking.
    fn install_fresh(&mut self, game_mode: GameMode, phase: SessionPhase) -> u64 {
        self.epoch += 1;
        self.state = GameState::new(game_mode, &mut self.rng);
        self.state.is_paused = phase == SessionPhase::Idle;
        self.buffered_direction = INITIAL_DIRECTION;
        self.phase = phase;
        self.ticks = 0;
        self.epoch
    }

    fn tick(&mut self, epoch: u64) -> TickOutcome {
        if epoch != self.epoch || self.phase != SessionPhase::Running {
            return TickOutcome::Stale;
        }

        let next = step(&self.state, self.buffered_direction, &mut self.rng);
        let new_speed = (next.speed != self.state.speed).then_some(next.speed);
        self.state = next;
        self.ticks += 1;

        if self.state.is_game_over {
            self.phase = SessionPhase::Over;
            return TickOutcome::GameOver(GameOverReport {
                score: self.state.score,
                game_mode: self.state.game_mode,
            });
        }

        TickOutcome::Advanced { new_speed }
    }
}

/// Owns one game and its tick schedule.
///
/// At most one schedule is live at a time. Every transition that stops the
/// schedule bumps the epoch under the state lock, so a tick that was already
/// due when the user reset or paused finds itself stale and does nothing.
pub struct PlayerSession<L: GameOverListener> {
    core: Arc<Mutex<SessionCore>>,
    listener: L,
    ticker: Option<JoinHandle<()>>,
}

impl<L: GameOverListener> PlayerSession<L> {
    pub fn new(game_mode: GameMode, listener: L) -> Self {
        Self::with_rng(game_mode, listener, SessionRng::from_random())
    }

    pub fn with_rng(game_mode: GameMode, listener: L, rng: SessionRng) -> Self {
        Self {
            core: Arc::new(Mutex::new(SessionCore::new(game_mode, rng))),
            listener,
            ticker: None,
        }
    }

    /// Begins a fresh game, discarding whatever was there.
    pub async fn start(&mut self) {
        self.stop_ticker();
        let (epoch, speed, game_mode) = {
            let mut core = self.core.lock().await;
            let game_mode = core.state.game_mode;
            let epoch = core.install_fresh(game_mode, SessionPhase::Running);
            (epoch, core.state.speed, game_mode)
        };
        log_debug!("Starting {} game", game_mode.as_str());
        self.spawn_ticker(epoch, speed);
    }

    pub async fn pause(&mut self) {
        {
            let mut core = self.core.lock().await;
            if core.phase != SessionPhase::Running {
                return;
            }
            core.epoch += 1;
            core.state.is_paused = true;
            core.phase = SessionPhase::Paused;
        }
        self.stop_ticker();
    }

    pub async fn resume(&mut self) {
        let (epoch, speed) = {
            let mut core = self.core.lock().await;
            if core.phase != SessionPhase::Paused {
                return;
            }
            core.epoch += 1;
            core.state.is_paused = false;
            core.phase = SessionPhase::Running;
            (core.epoch, core.state.speed)
        };
        self.stop_ticker();
        self.spawn_ticker(epoch, speed);
    }

    /// Back to a fresh idle game in the current mode.
    pub async fn reset(&mut self) {
        self.stop_ticker();
        let mut core = self.core.lock().await;
        let game_mode = core.state.game_mode;
        core.install_fresh(game_mode, SessionPhase::Idle);
    }

    /// Switching modes always abandons the current game.
    pub async fn set_game_mode(&mut self, game_mode: GameMode) {
        self.stop_ticker();
        self.core.lock().await.install_fresh(game_mode, SessionPhase::Idle);
        log_debug!("Game mode set to {}", game_mode.as_str());
    }

    /// Buffers `direction` for the next tick. The reverse of the last applied
    /// direction is ignored and `false` is returned.
    pub async fn set_direction(&self, direction: Direction) -> bool {
        let mut core = self.core.lock().await;
        if direction.is_opposite(&core.state.direction) {
            return false;
        }
        core.buffered_direction = direction;
        true
    }

    pub async fn snapshot(&self) -> GameState {
        self.core.lock().await.state.clone()
    }

    pub async fn phase(&self) -> SessionPhase {
        self.core.lock().await.phase
    }

    pub async fn buffered_direction(&self) -> Direction {
        self.core.lock().await.buffered_direction
    }

    /// Ticks applied since the current game started.
    pub async fn ticks(&self) -> u64 {
        self.core.lock().await.ticks
    }

    /// Stops ticking for good. A running game is left paused.
    pub async fn shutdown(&mut self) {
        {
            let mut core = self.core.lock().await;
            core.epoch += 1;
            if core.phase == SessionPhase::Running {
                core.state.is_paused = true;
                core.phase = SessionPhase::Paused;
            }
        }
        self.stop_ticker();
    }

    fn spawn_ticker(&mut self, epoch: u64, speed_ms: u32) {
        let core = self.core.clone();
        let listener = self.listener.clone();
        self.ticker = Some(tokio::spawn(run_ticker(core, listener, epoch, speed_ms)));
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub(crate) async fn install_state(&self, state: GameState) {
        self.core.lock().await.state = state;
    }
}

impl<L: GameOverListener> Drop for PlayerSession<L> {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

fn tick_schedule(speed_ms: u32) -> Interval {
    let period = Duration::from_millis(u64::from(speed_ms.max(1)));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn run_ticker<L: GameOverListener>(
    core: Arc<Mutex<SessionCore>>,
    listener: L,
    epoch: u64,
    speed_ms: u32,
) {
    let mut ticker = tick_schedule(speed_ms);

    loop {
        ticker.tick().await;

        let outcome = core.lock().await.tick(epoch);
        match outcome {
            TickOutcome::Stale => break,
            TickOutcome::Advanced { new_speed: None } => {}
            TickOutcome::Advanced { new_speed: Some(speed) } => {
                log_debug!("Speed changed to {}ms", speed);
                ticker = tick_schedule(speed);
            }
            TickOutcome::GameOver(report) => {
                log!("Game over in {} mode with score {}", report.game_mode.as_str(), report.score);
                // Detached so that a reset right after game over can't cancel delivery.
                tokio::spawn(async move {
                    listener.on_game_over(report).await;
                });
                break;
            }
        }
    }
}
