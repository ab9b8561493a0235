mod bot_controller;
mod game_state;
mod step;
mod types;

pub use bot_controller::{BotController, GREEDY_PROBABILITY};
pub use game_state::{
    FOOD_SCORE, GameState, INITIAL_DIRECTION, INITIAL_SPEED_MS, MIN_SPEED_MS,
    SPEED_STEP_MS, SPEED_UP_SCORE_INTERVAL,
};
pub use step::{place_food, step};
pub use types::{Direction, DotSide, GRID_CELLS, GRID_SIZE, GameMode, Position, Segment};
