use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::engine::SessionRng;
use super::step::place_food;
use super::types::{Direction, DotSide, GameMode, Position, Segment};

pub const INITIAL_SPEED_MS: u32 = 150;
pub const MIN_SPEED_MS: u32 = 50;
pub const SPEED_STEP_MS: u32 = 10;
pub const FOOD_SCORE: u32 = 10;
pub const SPEED_UP_SCORE_INTERVAL: u32 = 50;
pub const INITIAL_DIRECTION: Direction = Direction::Right;

const INITIAL_SNAKE: [Segment; 3] = [
    Segment::new(10, 10, DotSide::Left),
    Segment::new(9, 10, DotSide::Right),
    Segment::new(8, 10, DotSide::Left),
];

/// Plain snapshot of one game. Head is `snake[0]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub snake: VecDeque<Segment>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub is_game_over: bool,
    pub is_paused: bool,
    pub game_mode: GameMode,
    /// Tick interval in milliseconds.
    pub speed: u32,
}

impl GameState {
    pub fn new(game_mode: GameMode, rng: &mut SessionRng) -> Self {
        let snake: VecDeque<Segment> = INITIAL_SNAKE.into_iter().collect();
        let food = place_food(&snake, rng).expect("Initial snake leaves free cells");

        Self {
            snake,
            food,
            direction: INITIAL_DIRECTION,
            score: 0,
            is_game_over: false,
            is_paused: false,
            game_mode,
            speed: INITIAL_SPEED_MS,
        }
    }

    pub fn head(&self) -> Segment {
        *self.snake.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn occupies(&self, position: Position) -> bool {
        self.snake.iter().any(|segment| segment.position == position)
    }

    pub(crate) fn ended(&self) -> Self {
        Self {
            is_game_over: true,
            ..self.clone()
        }
    }
}
