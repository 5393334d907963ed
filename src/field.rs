use crate::config::{GridSize, MIN_FIELD_SIDE};
use crate::error::GameError;
use crate::snake::Position;

/// Classification of a single field cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CellKind {
    Wall,
    Empty,
    Food,
}

/// Fixed-size grid surrounded by a permanent wall ring.
///
/// Only food ever changes after construction, and at most one food cell
/// exists at a time.
#[derive(Debug, Clone)]
pub struct Field {
    size: GridSize,
    cells: Vec<CellKind>,
    food: Option<Position>,
}

impl Field {
    /// Builds the bordered grid. Fails when there is no interior cell.
    pub fn new(size: GridSize) -> Result<Self, GameError> {
        if size.width < MIN_FIELD_SIDE || size.height < MIN_FIELD_SIDE {
            return Err(GameError::NoInterior {
                width: size.width,
                height: size.height,
            });
        }

        let mut cells = Vec::with_capacity(size.total_cells());
        for y in 0..size.height {
            for x in 0..size.width {
                let on_ring =
                    x == 0 || y == 0 || x == size.width - 1 || y == size.height - 1;
                cells.push(if on_ring {
                    CellKind::Wall
                } else {
                    CellKind::Empty
                });
            }
        }

        Ok(Self {
            size,
            cells,
            food: None,
        })
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the current food cell, if one is placed.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn classify(&self, position: Position) -> Result<CellKind, GameError> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Returns true for cells strictly inside the wall ring.
    #[must_use]
    pub fn is_interior(&self, position: Position) -> bool {
        position.x > 0
            && position.y > 0
            && position.x < i32::from(self.size.width) - 1
            && position.y < i32::from(self.size.height) - 1
    }

    /// Iterates over interior cells in row-major order.
    pub fn interior_positions(&self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.size.width);
        let height = i32::from(self.size.height);
        (1..height - 1).flat_map(move |y| (1..width - 1).map(move |x| Position { x, y }))
    }

    /// Marks an empty cell as food, clearing any previously placed food.
    pub fn set_food(&mut self, position: Position) -> Result<(), GameError> {
        let index = self.index(position)?;
        if self.cells[index] != CellKind::Empty {
            return Err(GameError::CellNotEmpty {
                x: position.x,
                y: position.y,
            });
        }

        if let Some(previous) = self.food.take() {
            self.clear_food(previous)?;
        }

        self.cells[index] = CellKind::Food;
        self.food = Some(position);
        Ok(())
    }

    /// Turns a food cell back into an empty one.
    pub fn clear_food(&mut self, position: Position) -> Result<(), GameError> {
        let index = self.index(position)?;
        if self.cells[index] != CellKind::Food {
            return Err(GameError::NoFoodAt {
                x: position.x,
                y: position.y,
            });
        }

        self.cells[index] = CellKind::Empty;
        if self.food == Some(position) {
            self.food = None;
        }
        Ok(())
    }

    fn index(&self, position: Position) -> Result<usize, GameError> {
        if !position.is_within_bounds(self.size) {
            return Err(GameError::OutOfBounds {
                x: position.x,
                y: position.y,
            });
        }

        // Both coordinates are non-negative after the bounds check.
        let x = position.x.unsigned_abs() as usize;
        let y = position.y.unsigned_abs() as usize;
        Ok(y * usize::from(self.size.width) + x)
    }
}
