use std::time::Duration;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid, wall ring included.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the number of cells inside the wall ring.
    #[must_use]
    pub fn interior_cells(self) -> usize {
        usize::from(self.width.saturating_sub(2)) * usize::from(self.height.saturating_sub(2))
    }
}

/// Default field width, wall ring included.
pub const DEFAULT_FIELD_WIDTH: u16 = 20;

/// Default field height, wall ring included.
pub const DEFAULT_FIELD_HEIGHT: u16 = 15;

/// Segment count of a freshly spawned snake.
pub const DEFAULT_SNAKE_LENGTH: usize = 6;

/// Input poll timeout; one tick elapses per timeout without a command.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Smallest field that still has one interior cell.
pub const MIN_FIELD_SIDE: u16 = 3;

pub const GLYPH_WALL: &str = "#";
pub const GLYPH_EMPTY: &str = " ";
pub const GLYPH_FOOD: &str = "@";
pub const GLYPH_SNAKE_BODY: &str = "o";
pub const GLYPH_SNAKE_HEAD_UP: &str = "^";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "v";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "<";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = ">";
pub const GLYPH_SNAKE_HEAD_STILL: &str = "O";

/// Settings for one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub initial_length: usize,
    pub tick_interval: Duration,
    /// Ignore direct 180° turns while the body is longer than one segment.
    ///
    /// Off by default: an unguarded reversal runs the head into the second
    /// segment on the next tick.
    pub reversal_guard: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_FIELD_WIDTH,
                height: DEFAULT_FIELD_HEIGHT,
            },
            initial_length: DEFAULT_SNAKE_LENGTH,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            reversal_guard: false,
        }
    }
}
