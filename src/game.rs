use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::collision::{self, DeathReason};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::field::{CellKind, Field};
use crate::food::place_food;
use crate::input::{Direction, GameInput};
use crate::snake::{Heading, Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Crashed,
    Quit,
    /// A kernel error ended the game.
    Aborted,
}

/// What a single step did to the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The heading changed; nothing moved.
    Turned,
    /// A direction command was dropped by the reversal guard.
    Ignored,
    Moved,
    Ate,
    Crashed(DeathReason),
    Quit,
    /// The game was already over; nothing changed.
    Finished,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Field,
    pub snake: Snake,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    pub food_eaten: u32,
    reversal_guard: bool,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game seeded from system entropy.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(config: &GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, mut rng: StdRng) -> Result<Self, GameError> {
        let grid = config.grid;
        let length = config.initial_length.max(1);
        let too_small = GameError::FieldTooSmall {
            width: grid.width,
            height: grid.height,
            length,
        };

        let mut field = Field::new(grid)?;

        // The body starts horizontally centered and trails to the right.
        if length > usize::from(grid.width).saturating_sub(2)
            || length > grid.interior_cells()
        {
            return Err(too_small);
        }
        let span = i32::try_from(length).map_err(|_| too_small)?;
        let head = Position {
            x: (i32::from(grid.width) - span) / 2,
            y: i32::from(grid.height) / 2,
        };
        let snake = Snake::new(head, length, Direction::Left);
        if !snake.positions().all(|position| field.is_interior(position)) {
            return Err(too_small);
        }

        place_food(&mut rng, &mut field, &snake)?;
        info!(
            "new game on a {}x{} field, snake length {length}",
            grid.width, grid.height
        );

        Ok(Self {
            field,
            snake,
            status: GameStatus::Running,
            death_reason: None,
            tick_count: 0,
            food_eaten: 0,
            reversal_guard: config.reversal_guard,
            rng,
        })
    }

    /// Returns true once the game crashed or was quit.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status != GameStatus::Running
    }

    /// Applies one input event: quit, turn, or let a tick elapse.
    pub fn step(&mut self, input: GameInput) -> Result<StepOutcome, GameError> {
        if self.is_finished() {
            return Ok(StepOutcome::Finished);
        }

        match input {
            GameInput::Quit => {
                self.status = GameStatus::Quit;
                info!("quit after {} ticks", self.tick_count);
                Ok(StepOutcome::Quit)
            }
            GameInput::Direction(direction) => Ok(self.turn(direction)),
            GameInput::Timeout => self.tick(),
        }
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// A kernel error leaves the game [`GameStatus::Aborted`].
    pub fn tick(&mut self) -> Result<StepOutcome, GameError> {
        if self.is_finished() {
            return Ok(StepOutcome::Finished);
        }

        let outcome = self.advance_tick();
        if outcome.is_err() {
            self.status = GameStatus::Aborted;
        }
        outcome
    }

    fn advance_tick(&mut self) -> Result<StepOutcome, GameError> {
        self.tick_count += 1;
        let next = collision::next_head(&self.snake);

        if let Some(reason) = collision::detect(&self.field, &self.snake, next)? {
            self.status = GameStatus::Crashed;
            self.death_reason = Some(reason);
            info!(
                "crashed ({reason:?}) at ({}, {}) on tick {}, length {}",
                next.x,
                next.y,
                self.tick_count,
                self.snake.len()
            );
            return Ok(StepOutcome::Crashed(reason));
        }

        let grow = self.field.classify(next)? == CellKind::Food;
        if grow {
            self.field.clear_food(next)?;
        }

        self.snake.advance(next, grow);

        if !grow {
            return Ok(StepOutcome::Moved);
        }

        // Placed after the advance so the new head cell is never picked.
        self.food_eaten += 1;
        place_food(&mut self.rng, &mut self.field, &self.snake)?;
        Ok(StepOutcome::Ate)
    }

    fn turn(&mut self, direction: Direction) -> StepOutcome {
        let heading = Heading::from(direction);

        if self.reversal_guard
            && self.snake.len() > 1
            && heading == self.snake.heading().opposite()
        {
            debug!("ignored reversal to {direction:?}");
            return StepOutcome::Ignored;
        }

        self.snake.set_heading(heading);
        debug!("heading set to {direction:?}");
        StepOutcome::Turned
    }
}

#[cfg(test)]
mod tests {
    use crate::collision::DeathReason;
    use crate::config::{GameConfig, GridSize};
    use crate::error::GameError;
    use crate::field::CellKind;
    use crate::input::{Direction, GameInput};
    use crate::snake::{Position, Snake};

    use super::{GameState, GameStatus, StepOutcome};

    fn config(width: u16, height: u16, initial_length: usize) -> GameConfig {
        GameConfig {
            grid: GridSize { width, height },
            initial_length,
            ..GameConfig::default()
        }
    }

    /// Moves the food somewhere the snake will not reach in the next ticks.
    fn park_food(state: &mut GameState, position: Position) {
        if state.field.food() != Some(position) {
            state.field.set_food(position).unwrap();
        }
    }

    #[test]
    fn new_game_centers_snake_heading_left() {
        let state = GameState::new_with_seed(&GameConfig::default(), 1).unwrap();

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snake.len(), 6);
        assert_eq!(state.snake.head().position, Position::new(7, 7));
        assert_eq!(state.snake.tail().position, Position::new(12, 7));
        assert_eq!(
            state.snake.heading().direction(),
            Some(Direction::Left)
        );

        let food = state.field.food().expect("food should be placed");
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn snake_that_does_not_fit_is_rejected() {
        assert!(matches!(
            GameState::new_with_seed(&config(6, 6, 5), 1),
            Err(GameError::FieldTooSmall { length: 5, .. })
        ));
        assert!(matches!(
            GameState::new_with_seed(&config(2, 6, 1), 1),
            Err(GameError::NoInterior { .. })
        ));
    }

    #[test]
    fn huge_initial_length_is_rejected_before_building_the_body() {
        let config = GameConfig {
            initial_length: i32::MAX as usize,
            ..GameConfig::default()
        };

        assert!(matches!(
            GameState::new_with_seed(&config, 1),
            Err(GameError::FieldTooSmall { width: 20, height: 15, .. })
        ));
        assert!(matches!(
            GameState::new_with_seed(
                &GameConfig {
                    initial_length: 19,
                    ..GameConfig::default()
                },
                1
            ),
            Err(GameError::FieldTooSmall { length: 19, .. })
        ));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = GameState::new_with_seed(&config(10, 10, 1), 1).unwrap();
        state.snake = Snake::new(Position::new(1, 1), 1, Direction::Right);
        park_food(&mut state, Position::new(3, 1));

        assert_eq!(state.tick(), Ok(StepOutcome::Moved));
        assert_eq!(state.snake.len(), 1);

        assert_eq!(state.tick(), Ok(StepOutcome::Ate));
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.food_eaten, 1);

        let food = state.field.food().expect("new food should be placed");
        assert_ne!(food, Position::new(3, 1));
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn snake_collision_with_wall_sets_crashed() {
        let mut state = GameState::new_with_seed(&config(6, 6, 1), 2).unwrap();
        state.snake = Snake::new(Position::new(4, 1), 1, Direction::Right);

        assert_eq!(
            state.tick(),
            Ok(StepOutcome::Crashed(DeathReason::WallCollision))
        );
        assert_eq!(state.status, GameStatus::Crashed);
        assert_eq!(state.death_reason, Some(DeathReason::WallCollision));
    }

    #[test]
    fn snake_collision_with_self_sets_crashed() {
        let mut state = GameState::new_with_seed(&config(8, 8, 1), 3).unwrap();
        park_food(&mut state, Position::new(6, 6));
        state.snake = Snake::from_positions(
            vec![
                Position::new(3, 3),
                Position::new(2, 3),
                Position::new(2, 4),
                Position::new(3, 4),
                Position::new(4, 4),
                Position::new(4, 3),
            ],
            Direction::Down,
        );

        assert_eq!(
            state.tick(),
            Ok(StepOutcome::Crashed(DeathReason::SelfCollision))
        );
        assert_eq!(state.status, GameStatus::Crashed);
    }

    #[test]
    fn crash_leaves_body_untouched() {
        let mut state = GameState::new_with_seed(&config(6, 6, 1), 2).unwrap();
        state.snake = Snake::new(Position::new(4, 2), 1, Direction::Right);
        let before: Vec<_> = state.snake.positions().collect();

        let _ = state.tick();

        assert_eq!(state.snake.positions().collect::<Vec<_>>(), before);
    }

    #[test]
    fn quit_is_terminal() {
        let mut state = GameState::new_with_seed(&GameConfig::default(), 4).unwrap();

        assert_eq!(state.step(GameInput::Quit), Ok(StepOutcome::Quit));
        assert!(state.is_finished());

        let head = state.snake.head();
        assert_eq!(state.step(GameInput::Timeout), Ok(StepOutcome::Finished));
        assert_eq!(
            state.step(GameInput::Direction(Direction::Up)),
            Ok(StepOutcome::Finished)
        );
        assert_eq!(state.tick(), Ok(StepOutcome::Finished));
        assert_eq!(state.snake.head(), head);
        assert_eq!(state.status, GameStatus::Quit);
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn direction_input_does_not_move() {
        let mut state = GameState::new_with_seed(&GameConfig::default(), 5).unwrap();
        let head = state.snake.head().position;

        assert_eq!(
            state.step(GameInput::Direction(Direction::Up)),
            Ok(StepOutcome::Turned)
        );

        assert_eq!(state.snake.head().position, head);
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.snake.heading().direction(), Some(Direction::Up));
    }

    #[test]
    fn unguarded_reversal_is_accepted_and_fatal() {
        let mut state = GameState::new_with_seed(&GameConfig::default(), 6).unwrap();

        assert_eq!(
            state.step(GameInput::Direction(Direction::Right)),
            Ok(StepOutcome::Turned)
        );
        assert_eq!(
            state.step(GameInput::Timeout),
            Ok(StepOutcome::Crashed(DeathReason::SelfCollision))
        );
    }

    #[test]
    fn reversal_guard_drops_direct_reversal() {
        let config = GameConfig {
            reversal_guard: true,
            ..GameConfig::default()
        };
        let mut state = GameState::new_with_seed(&config, 6).unwrap();
        park_food(&mut state, Position::new(15, 13));

        assert_eq!(
            state.step(GameInput::Direction(Direction::Right)),
            Ok(StepOutcome::Ignored)
        );
        assert_eq!(state.step(GameInput::Timeout), Ok(StepOutcome::Moved));
        assert_eq!(state.snake.head().position, Position::new(6, 7));
    }

    #[test]
    fn reversal_guard_allows_reversing_a_single_segment() {
        let config = GameConfig {
            reversal_guard: true,
            initial_length: 1,
            ..GameConfig::default()
        };
        let mut state = GameState::new_with_seed(&config, 8).unwrap();

        assert_eq!(
            state.step(GameInput::Direction(Direction::Right)),
            Ok(StepOutcome::Turned)
        );
    }

    #[test]
    fn eaten_food_cell_is_now_under_the_head() {
        let mut state = GameState::new_with_seed(&GameConfig::default(), 9).unwrap();
        park_food(&mut state, Position::new(6, 7));

        assert_eq!(state.step(GameInput::Timeout), Ok(StepOutcome::Ate));

        assert_eq!(state.snake.head().position, Position::new(6, 7));
        assert_eq!(
            state.field.classify(Position::new(6, 7)),
            Ok(CellKind::Empty)
        );
        assert_ne!(state.field.food(), Some(Position::new(6, 7)));
    }

    #[test]
    fn filling_the_board_reports_board_full() {
        // 3x4 field: two interior cells, stacked vertically.
        let mut state = GameState::new_with_seed(&config(3, 4, 1), 10).unwrap();
        assert_eq!(state.snake.head().position, Position::new(1, 2));
        assert_eq!(state.field.food(), Some(Position::new(1, 1)));

        assert_eq!(
            state.step(GameInput::Direction(Direction::Up)),
            Ok(StepOutcome::Turned)
        );
        assert_eq!(state.tick(), Err(GameError::BoardFull));
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.status, GameStatus::Aborted);
        assert!(state.is_finished());
        assert_eq!(state.tick(), Ok(StepOutcome::Finished));
    }
}
