//! One discrete tick of the simulation.

use std::collections::{HashSet, VecDeque};

use crate::engine::SessionRng;
use super::game_state::{FOOD_SCORE, GameState, MIN_SPEED_MS, SPEED_STEP_MS, SPEED_UP_SCORE_INTERVAL};
use super::types::{Direction, GRID_CELLS, GRID_SIZE, GameMode, Position, Segment};

/// Picks a free cell uniformly at random, or `None` when the snake covers the whole grid.
pub fn place_food(snake: &VecDeque<Segment>, rng: &mut SessionRng) -> Option<Position> {
    let occupied: HashSet<Position> = snake.iter().map(|segment| segment.position).collect();
    if occupied.len() >= GRID_CELLS {
        return None;
    }

    loop {
        let candidate = Position::new(
            rng.random_range(0..GRID_SIZE),
            rng.random_range(0..GRID_SIZE),
        );
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }
}

/// Advances `state` by one tick in `direction`.
///
/// Paused and finished games come back unchanged. A wall hit (walls mode) or a
/// self-collision returns the input with only `is_game_over` set.
pub fn step(state: &GameState, direction: Direction, rng: &mut SessionRng) -> GameState {
    if state.is_game_over || state.is_paused {
        return state.clone();
    }

    let head = state.head();
    let candidate = head.position.offset(direction);

    let next_position = match state.game_mode {
        GameMode::PassThrough => candidate.wrapped(),
        GameMode::Walls => {
            if !candidate.is_on_grid() {
                return state.ended();
            }
            candidate
        }
    };

    // The tail cell counts as occupied even though it would move this tick.
    if state.occupies(next_position) {
        return state.ended();
    }

    let new_head = Segment {
        position: next_position,
        dot_side: head.dot_side.flipped(),
    };

    let mut next = state.clone();
    next.snake.push_front(new_head);
    next.direction = direction;

    if next_position == state.food {
        next.score += FOOD_SCORE;

        if next.score % SPEED_UP_SCORE_INTERVAL == 0 && next.speed > MIN_SPEED_MS {
            next.speed = next.speed.saturating_sub(SPEED_STEP_MS).max(MIN_SPEED_MS);
        }

        match place_food(&next.snake, rng) {
            Some(food) => next.food = food,
            // Board is full: nothing left to eat.
            None => next.is_game_over = true,
        }
    } else {
        next.snake.pop_back();
    }

    next
}
