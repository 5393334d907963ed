use std::io;

use thiserror::Error;

/// Kernel failures. None of these are recoverable for the current game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("coordinate ({x}, {y}) lies outside the field")]
    OutOfBounds { x: i32, y: i32 },

    #[error("no empty cell left for food")]
    BoardFull,

    #[error("a {width}x{height} field has no cell inside its wall ring")]
    NoInterior { width: u16, height: u16 },

    #[error("a {width}x{height} field cannot hold a snake of length {length}")]
    FieldTooSmall {
        width: u16,
        height: u16,
        length: usize,
    },

    #[error("cell ({x}, {y}) is not empty")]
    CellNotEmpty { x: i32, y: i32 },

    #[error("cell ({x}, {y}) holds no food")]
    NoFoodAt { x: i32, y: i32 },
}

/// Failures of an interactive session: terminal I/O or the kernel itself.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Game(#[from] GameError),
}
