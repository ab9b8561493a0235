use std::future::Future;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::engine::snake::GameMode;
use crate::log;

/// Final score of one game, handed to whoever records it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverReport {
    pub score: u32,
    pub game_mode: GameMode,
}

/// Called once per game, when a running session reaches game over.
pub trait GameOverListener: Send + Sync + Clone + 'static {
    fn on_game_over(&self, report: GameOverReport) -> impl Future<Output = ()> + Send;
}

impl GameOverListener for mpsc::UnboundedSender<GameOverReport> {
    async fn on_game_over(&self, report: GameOverReport) {
        if self.send(report).is_err() {
            log!("Game over receiver is gone, dropping score {}", report.score);
        }
    }
}

impl<A, B> GameOverListener for (A, B)
where
    A: GameOverListener,
    B: GameOverListener,
{
    async fn on_game_over(&self, report: GameOverReport) {
        self.0.on_game_over(report).await;
        self.1.on_game_over(report).await;
    }
}
