use crate::error::GameError;
use crate::field::{CellKind, Field};
use crate::snake::{Position, Snake};

/// Why a run ended in a crash.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Returns the head position for the next movement tick.
///
/// Not clamped: the result may sit on the wall ring, which is the crash signal.
#[must_use]
pub fn next_head(snake: &Snake) -> Position {
    snake.head().position.stepped(snake.heading())
}

/// Returns true when `position` is a wall cell.
pub fn is_field_crash(field: &Field, position: Position) -> Result<bool, GameError> {
    Ok(field.classify(position)? == CellKind::Wall)
}

/// Returns true when `position` hits the body.
///
/// The tail is vacated before the head moves in, so its cell does not count.
#[must_use]
pub fn is_self_crash(snake: &Snake, position: Position) -> bool {
    snake.occupies_excluding_tail(position)
}

/// Tests a candidate head against the walls first, then the body.
pub fn detect(
    field: &Field,
    snake: &Snake,
    position: Position,
) -> Result<Option<DeathReason>, GameError> {
    if is_field_crash(field, position)? {
        return Ok(Some(DeathReason::WallCollision));
    }

    if is_self_crash(snake, position) {
        return Ok(Some(DeathReason::SelfCollision));
    }

    Ok(None)
}
