//! Plays whole games on a player session, one steering decision per tick.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{MissedTickBehavior, interval};

use common::api::{LeaderboardSubmitter, ShowdownApi};
use common::engine::SessionRng;
use common::engine::session::{GameOverListener, GameOverReport, PlayerSession};
use common::engine::snake::BotController;
use common::log;

use crate::config::GameConfig;

/// Starts a fresh game and steers it until the session reports game over.
pub async fn play_one_game<L: GameOverListener>(
    session: &mut PlayerSession<L>,
    reports: &mut UnboundedReceiver<GameOverReport>,
    rng: &mut SessionRng,
    poll_interval: Duration,
) -> Option<GameOverReport> {
    session.start().await;

    let mut poll = interval(poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut steered_tick = None;

    loop {
        tokio::select! {
            report = reports.recv() => return report,
            _ = poll.tick() => {
                let tick = session.ticks().await;
                if steered_tick == Some(tick) {
                    continue;
                }
                let state = session.snapshot().await;
                if state.is_game_over {
                    continue;
                }
                let direction = BotController::choose_direction(&state, rng);
                session.set_direction(direction).await;
                steered_tick = Some(tick);
            }
        }
    }
}

/// Plays `settings.games` games back to back; scores go to the leaderboard
/// through `api` before each report is returned.
pub async fn run_games<A: ShowdownApi>(api: &A, settings: &GameConfig) -> Vec<GameOverReport> {
    let mut rng = match settings.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Autopilot seed {}", rng.seed());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let listener = (LeaderboardSubmitter::new(api.clone()), tx);
    let mut session = PlayerSession::with_rng(settings.mode, listener, SessionRng::new(rng.random()));
    let poll_interval = Duration::from_millis(settings.poll_interval_ms);

    let mut reports = Vec::new();
    for game in 1..=settings.games {
        match play_one_game(&mut session, &mut rx, &mut rng, poll_interval).await {
            Some(report) => {
                log!("Game {}/{} over, score {}", game, settings.games, report.score);
                reports.push(report);
            }
            None => {
                log!("Session stopped reporting, giving up after {} games", reports.len());
                break;
            }
        }
    }

    session.shutdown().await;
    reports
}
