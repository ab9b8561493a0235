use crate::engine::session::{GameOverListener, GameOverReport};
use crate::{log, log_debug};
use super::ShowdownApi;

/// Posts each finished game's score to the leaderboard.
#[derive(Clone)]
pub struct LeaderboardSubmitter<A: ShowdownApi> {
    api: A,
}

impl<A: ShowdownApi> LeaderboardSubmitter<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

impl<A: ShowdownApi> GameOverListener for LeaderboardSubmitter<A> {
    async fn on_game_over(&self, report: GameOverReport) {
        if report.score == 0 {
            log_debug!("Nothing to submit for a scoreless game");
            return;
        }

        let response = self.api.submit_score(report.score, report.game_mode).await;
        match response.entry {
            Some(entry) if response.success => {
                log!("Score {} recorded at rank {}", entry.score, entry.rank);
            }
            _ => {
                log!(
                    "Score {} not recorded: {}",
                    report.score,
                    response.error.unwrap_or_else(|| "unknown error".to_string())
                );
            }
        }
    }
}
