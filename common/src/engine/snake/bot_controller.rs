use crate::engine::SessionRng;
use super::game_state::GameState;
use super::step::step;
use super::types::Direction;

/// Share of ticks on which the autopilot heads for the food instead of turning at random.
pub const GREEDY_PROBABILITY: f64 = 0.7;

pub struct BotController;

impl BotController {
    /// Never returns the reverse of the applied direction.
    pub fn choose_direction(state: &GameState, rng: &mut SessionRng) -> Direction {
        let candidate = if rng.random_bool(GREEDY_PROBABILITY) {
            Self::towards_food(state)
        } else {
            Direction::ALL[rng.random_range(0..Direction::ALL.len())]
        };

        hold_course(candidate, state.direction)
    }

    /// Closes the larger axis gap first; ties go vertical.
    pub fn towards_food(state: &GameState) -> Direction {
        let head = state.head().position;
        let dx = state.food.x - head.x;
        let dy = state.food.y - head.y;

        if dx.abs() > dy.abs() {
            if dx > 0 { Direction::Right } else { Direction::Left }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// One autopilot tick. Finished games are left for the owner to restart.
    pub fn advance(state: &GameState, rng: &mut SessionRng) -> GameState {
        if state.is_game_over {
            return state.clone();
        }
        let direction = Self::choose_direction(state, rng);
        step(state, direction, rng)
    }
}

/// A reversal would run the head into the neck, so keep going straight instead.
fn hold_course(candidate: Direction, current: Direction) -> Direction {
    if candidate.is_opposite(&current) {
        current
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::snake::{GameMode, Position};

    fn state_with_food(food: Position, direction: Direction) -> GameState {
        let mut rng = SessionRng::new(0);
        let mut state = GameState::new(GameMode::Walls, &mut rng);
        state.food = food;
        state.direction = direction;
        state
    }

    #[test]
    fn test_towards_food_prefers_larger_gap() {
        assert_eq!(
            BotController::towards_food(&state_with_food(Position::new(18, 12), Direction::Right)),
            Direction::Right
        );
        assert_eq!(
            BotController::towards_food(&state_with_food(Position::new(2, 12), Direction::Right)),
            Direction::Left
        );
        assert_eq!(
            BotController::towards_food(&state_with_food(Position::new(11, 2), Direction::Right)),
            Direction::Up
        );
        assert_eq!(
            BotController::towards_food(&state_with_food(Position::new(9, 19), Direction::Right)),
            Direction::Down
        );
    }

    #[test]
    fn test_towards_food_tie_goes_vertical() {
        let state = state_with_food(Position::new(13, 13), Direction::Right);
        assert_eq!(BotController::towards_food(&state), Direction::Down);
        let state = state_with_food(Position::new(7, 7), Direction::Right);
        assert_eq!(BotController::towards_food(&state), Direction::Up);
    }

    #[test]
    fn test_never_chooses_reversal() {
        let mut rng = SessionRng::new(42);
        // Food straight behind the head.
        let state = state_with_food(Position::new(2, 10), Direction::Right);
        for _ in 0..2000 {
            let direction = BotController::choose_direction(&state, &mut rng);
            assert_ne!(direction, Direction::Left);
        }
    }

    #[test]
    fn test_hold_course_keeps_current_direction() {
        for current in Direction::ALL {
            assert_eq!(hold_course(current.opposite(), current), current);
            for candidate in Direction::ALL {
                if candidate != current.opposite() {
                    assert_eq!(hold_course(candidate, current), candidate);
                }
            }
        }
    }

    #[test]
    fn test_food_behind_keeps_heading() {
        let mut rng = SessionRng::new(5);
        let state = state_with_food(Position::new(2, 10), Direction::Right);
        let trials = 10_000;
        let mut right = 0;
        let mut turns = 0;
        for _ in 0..trials {
            match BotController::choose_direction(&state, &mut rng) {
                Direction::Right => right += 1,
                Direction::Up | Direction::Down => turns += 1,
                Direction::Left => panic!("reversed into the neck"),
            }
        }
        // Greedy picks plus the random Left and Right picks all hold course.
        let straight = right as f64 / trials as f64;
        let turned = turns as f64 / trials as f64;
        assert!(straight > 0.80 && straight < 0.90, "straight {}", straight);
        assert!(turned > 0.10 && turned < 0.20, "turned {}", turned);
    }

    #[test]
    fn test_mostly_greedy() {
        let mut rng = SessionRng::new(7);
        let state = state_with_food(Position::new(10, 2), Direction::Right);
        let trials = 10_000;
        let greedy = (0..trials)
            .filter(|_| BotController::choose_direction(&state, &mut rng) == Direction::Up)
            .count();
        // 0.7 greedy plus a quarter of the random picks.
        let share = greedy as f64 / trials as f64;
        assert!(share > 0.70 && share < 0.83, "share {}", share);
    }

    #[test]
    fn test_advance_leaves_finished_game() {
        let mut rng = SessionRng::new(3);
        let mut state = state_with_food(Position::new(0, 0), Direction::Right);
        state.is_game_over = true;
        assert_eq!(BotController::advance(&state, &mut rng), state);
    }

    #[test]
    fn test_advance_eventually_ends_walls_game() {
        let mut rng = SessionRng::new(11);
        let mut state = GameState::new(GameMode::Walls, &mut rng);
        for _ in 0..100_000 {
            state = BotController::advance(&state, &mut rng);
            if state.is_game_over {
                break;
            }
            assert_eq!(state.score % 10, 0);
            assert!(state.len() >= 3);
        }
        assert!(state.is_game_over);
    }
}
