use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One event of the input stream; exactly one is consumed per game step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Quit,
    /// The poll interval elapsed without a command.
    Timeout,
}

/// Lazy, endless producer of game inputs.
pub trait InputSource {
    /// Blocks until a command arrives or the tick interval elapses.
    fn poll(&mut self) -> io::Result<GameInput>;

    /// Blocks until the player dismisses the end-of-game message.
    fn wait_for_acknowledgement(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Keyboard input read through crossterm with a fixed poll timeout.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardInput {
    tick_interval: Duration,
}

impl KeyboardInput {
    #[must_use]
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> io::Result<GameInput> {
        let deadline = Instant::now() + self.tick_interval;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(GameInput::Timeout);
            }

            // Unmapped keys and resize events keep waiting out the interval.
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    return Ok(input);
                }
            }
        }
    }

    fn wait_for_acknowledgement(&mut self) -> io::Result<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

/// Maps a key press to a game command.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Direction::Up,
        KeyCode::Down | KeyCode::Char('s' | 'S') => Direction::Down,
        KeyCode::Left | KeyCode::Char('a' | 'A') => Direction::Left,
        KeyCode::Right | KeyCode::Char('d' | 'D') => Direction::Right,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Some(GameInput::Quit),
        _ => return None,
    };

    Some(GameInput::Direction(direction))
}

/// Replays a fixed input sequence, then quits forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<GameInput>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(inputs: impl IntoIterator<Item = GameInput>) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<GameInput> {
        Ok(self.queue.pop_front().unwrap_or(GameInput::Quit))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{map_key, Direction, GameInput, InputSource, ScriptedInput};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Right)),
            Some(GameInput::Direction(Direction::Right))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('S'))),
            Some(GameInput::Direction(Direction::Down))
        );
    }

    #[test]
    fn quit_keys_map_to_quit() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(GameInput::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
    }

    #[test]
    fn unmapped_and_released_keys_are_ignored() {
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);

        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn scripted_input_quits_when_exhausted() {
        let mut input = ScriptedInput::new([
            GameInput::Timeout,
            GameInput::Direction(Direction::Up),
        ]);

        assert_eq!(input.poll().unwrap(), GameInput::Timeout);
        assert_eq!(
            input.poll().unwrap(),
            GameInput::Direction(Direction::Up)
        );
        assert_eq!(input.poll().unwrap(), GameInput::Quit);
        assert_eq!(input.poll().unwrap(), GameInput::Quit);
    }
}
