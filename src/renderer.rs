use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::Frame;

use crate::config::{
    GridSize, GLYPH_EMPTY, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_STILL, GLYPH_SNAKE_HEAD_UP,
    GLYPH_WALL,
};
use crate::field::CellKind;
use crate::game::GameStatus;
use crate::input::Direction;
use crate::session::FrameView;
use crate::snake::{Heading, Position};
use crate::ui::menu::{render_crash_message, render_quit_message};

/// Renders the field, the snake and the status line from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &FrameView<'_>) {
    let size = state.field.size();
    let field_area = field_area(frame.area(), size);

    render_field(frame, field_area, state);
    render_snake(frame, field_area, state);
    render_status_line(frame, field_area, state);
}

/// Renders the final frame with the outcome message on top.
pub fn render_outcome(frame: &mut Frame<'_>, state: &FrameView<'_>) {
    render(frame, state);

    let area = frame.area();
    match state.status {
        GameStatus::Crashed => {
            render_crash_message(frame, area, state.snake.len(), state.death_reason);
        }
        GameStatus::Quit => render_quit_message(frame, area, state.snake.len()),
        GameStatus::Running | GameStatus::Aborted => {}
    }
}

/// Centers a field of `size` cells inside `area`, clipping when it does not fit.
#[must_use]
pub fn field_area(area: Rect, size: GridSize) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_field(frame: &mut Frame<'_>, inner: Rect, state: &FrameView<'_>) {
    let size = state.field.size();
    let buffer = frame.buffer_mut();

    for y in 0..i32::from(size.height) {
        for x in 0..i32::from(size.width) {
            let position = Position { x, y };
            let Ok(kind) = state.field.classify(position) else {
                continue;
            };
            let Some((column, row)) = logical_to_terminal(inner, size, position) else {
                continue;
            };

            let (glyph, style) = match kind {
                CellKind::Wall => (GLYPH_WALL, Style::new().fg(Color::Gray)),
                CellKind::Empty => (GLYPH_EMPTY, Style::new()),
                CellKind::Food => (
                    GLYPH_FOOD,
                    Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
            };
            buffer.set_string(column, row, glyph, style);
        }
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &FrameView<'_>) {
    let size = state.field.size();
    let buffer = frame.buffer_mut();

    for (index, segment) in state.snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, size, segment.position) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph(state.snake.heading()),
                Style::new()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(Color::Green));
        }
    }
}

fn render_status_line(frame: &mut Frame<'_>, inner: Rect, state: &FrameView<'_>) {
    let area = frame.area();
    let row = inner.bottom();
    if row >= area.bottom() {
        return;
    }

    let text = format!(
        "Length: {}  Food: {}",
        state.snake.len(),
        state.food_eaten
    );
    let max_width = usize::from(area.right() - inner.x);
    frame.buffer_mut().set_stringn(
        inner.x,
        row,
        text,
        max_width,
        Style::new().fg(Color::DarkGray),
    );
}

fn head_glyph(heading: Heading) -> &'static str {
    match heading.direction() {
        Some(Direction::Up) => GLYPH_SNAKE_HEAD_UP,
        Some(Direction::Down) => GLYPH_SNAKE_HEAD_DOWN,
        Some(Direction::Left) => GLYPH_SNAKE_HEAD_LEFT,
        Some(Direction::Right) => GLYPH_SNAKE_HEAD_RIGHT,
        None => GLYPH_SNAKE_HEAD_STILL,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
