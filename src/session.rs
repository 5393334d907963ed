use std::io;

use log::info;

use crate::collision::DeathReason;
use crate::error::SessionError;
use crate::field::Field;
use crate::game::{GameState, GameStatus};
use crate::input::InputSource;
use crate::snake::Snake;

/// Read-only consumer of the game state.
pub trait Renderer {
    /// Draws the current frame. Called once before every input poll.
    fn on_tick(&mut self, state: &FrameView<'_>) -> io::Result<()>;

    /// Draws the end-of-game message.
    fn on_finish(&mut self, state: &FrameView<'_>) -> io::Result<()>;
}

/// Borrowed snapshot handed to a [`Renderer`] between steps.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub field: &'a Field,
    pub snake: &'a Snake,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub food_eaten: u32,
}

impl<'a> FrameView<'a> {
    #[must_use]
    pub fn of(state: &'a GameState) -> Self {
        Self {
            field: &state.field,
            snake: &state.snake,
            status: state.status,
            death_reason: state.death_reason,
            food_eaten: state.food_eaten,
        }
    }
}

/// Runs the game until it crashes or is quit, one step per input event.
///
/// Returns the terminal status after the player acknowledged the outcome.
pub fn run_session<I, R>(
    state: &mut GameState,
    input: &mut I,
    renderer: &mut R,
) -> Result<GameStatus, SessionError>
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
{
    while !state.is_finished() {
        renderer.on_tick(&FrameView::of(state))?;

        let event = input.poll()?;
        state.step(event)?;
    }

    info!(
        "game over: {:?}, length {}, food eaten {}",
        state.status,
        state.snake.len(),
        state.food_eaten
    );

    renderer.on_finish(&FrameView::of(state))?;
    input.wait_for_acknowledgement()?;

    Ok(state.status)
}
