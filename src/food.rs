use std::ops::Range;

use log::{debug, warn};
use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::field::{CellKind, Field};
use crate::snake::{Position, Snake};

/// Random draws tried before falling back to a full scan of the interior.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 256;

/// Coordinate ranges food is sampled from.
///
/// Food is biased to the lower half of the interior, away from the spawn row
/// and above. Both ranges are half-open; the exclusive bound is the wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodRegion {
    pub x: Range<i32>,
    pub y: Range<i32>,
}

/// Returns the sampling region for a field of `size`.
#[must_use]
pub fn food_region(size: GridSize) -> FoodRegion {
    let width = i32::from(size.width);
    let height = i32::from(size.height);

    FoodRegion {
        x: 1..width - 1,
        y: (height / 2).max(1)..height - 1,
    }
}

/// Places food on a random empty cell not covered by the snake.
///
/// Samples the food region first; once the attempts run out, every free
/// interior cell is collected and one is picked uniformly.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    field: &mut Field,
    snake: &Snake,
) -> Result<Position, GameError> {
    let position = match sample_region(rng, field, snake) {
        Some(position) => position,
        None => {
            warn!(
                "food sampling gave up after {MAX_PLACEMENT_ATTEMPTS} attempts, scanning the field"
            );
            scan_free_cell(rng, field, snake)?
        }
    };

    field.set_food(position)?;
    debug!("food placed at ({}, {})", position.x, position.y);
    Ok(position)
}

fn sample_region<R: Rng + ?Sized>(rng: &mut R, field: &Field, snake: &Snake) -> Option<Position> {
    let region = food_region(field.size());
    if region.x.is_empty() || region.y.is_empty() {
        return None;
    }

    (0..MAX_PLACEMENT_ATTEMPTS)
        .map(|_| Position {
            x: rng.gen_range(region.x.clone()),
            y: rng.gen_range(region.y.clone()),
        })
        .find(|candidate| is_free(field, snake, *candidate))
}

fn scan_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    field: &Field,
    snake: &Snake,
) -> Result<Position, GameError> {
    let mut candidates = Vec::with_capacity(field.size().interior_cells());
    candidates.extend(
        field
            .interior_positions()
            .filter(|candidate| is_free(field, snake, *candidate)),
    );

    if candidates.is_empty() {
        return Err(GameError::BoardFull);
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

fn is_free(field: &Field, snake: &Snake, position: Position) -> bool {
    field.classify(position) == Ok(CellKind::Empty) && !snake.occupies(position)
}
