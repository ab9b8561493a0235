mod game_over;
mod player_session;
mod spectator;

pub use game_over::{GameOverListener, GameOverReport};
pub use player_session::{PlayerSession, SessionPhase};
pub use spectator::{ActivePlayer, SpectatorConfig, SpectatorPool, next_autonomous_state};
