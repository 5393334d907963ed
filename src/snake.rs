use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring position one step along `heading`.
    #[must_use]
    pub fn stepped(self, heading: Heading) -> Self {
        Self {
            x: self.x + heading.dx.delta(),
            y: self.y + heading.dy.delta(),
        }
    }
}

/// Movement along one axis.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Step {
    Negative,
    #[default]
    Zero,
    Positive,
}

impl Step {
    #[must_use]
    pub fn delta(self) -> i32 {
        match self {
            Self::Negative => -1,
            Self::Zero => 0,
            Self::Positive => 1,
        }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Negative => Self::Positive,
            Self::Zero => Self::Zero,
            Self::Positive => Self::Negative,
        }
    }
}

/// Per-axis heading of the snake.
///
/// Only built from a [`Direction`] or as [`Heading::STILL`], so at most one
/// axis is ever non-zero.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Heading {
    dx: Step,
    dy: Step,
}

impl Heading {
    pub const STILL: Self = Self {
        dx: Step::Zero,
        dy: Step::Zero,
    };

    #[must_use]
    pub fn dx(self) -> Step {
        self.dx
    }

    #[must_use]
    pub fn dy(self) -> Step {
        self.dy
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        Self {
            dx: self.dx.reversed(),
            dy: self.dy.reversed(),
        }
    }

    /// Returns the cardinal direction, or `None` when standing still.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match (self.dx, self.dy) {
            (Step::Zero, Step::Negative) => Some(Direction::Up),
            (Step::Zero, Step::Positive) => Some(Direction::Down),
            (Step::Negative, Step::Zero) => Some(Direction::Left),
            (Step::Positive, Step::Zero) => Some(Direction::Right),
            _ => None,
        }
    }
}

impl From<Direction> for Heading {
    fn from(direction: Direction) -> Self {
        let (dx, dy) = match direction {
            Direction::Up => (Step::Zero, Step::Negative),
            Direction::Down => (Step::Zero, Step::Positive),
            Direction::Left => (Step::Negative, Step::Zero),
            Direction::Right => (Step::Positive, Step::Zero),
        };
        Self { dx, dy }
    }
}

/// One body cell. A segment keeps the heading it had while it was the head.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub position: Position,
    pub heading: Option<Heading>,
}

/// Ordered chain of segments, head first.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Segment>,
}

impl Snake {
    /// Lays out `length` segments from `head`, trailing away from `direction`.
    ///
    /// `length` is clamped to at least one segment.
    #[must_use]
    pub fn new(head: Position, length: usize, direction: Direction) -> Self {
        let heading = Heading::from(direction);
        let (dx, dy) = (heading.dx.delta(), heading.dy.delta());

        let body = (0..length.max(1))
            .map(|index| {
                let offset = i32::try_from(index).unwrap_or(i32::MAX);
                Segment {
                    position: Position {
                        x: head.x - dx * offset,
                        y: head.y - dy * offset,
                    },
                    heading: Some(heading),
                }
            })
            .collect();

        Self { body }
    }

    /// Creates a snake from explicit body positions (front is head).
    ///
    /// Falls back to a single still segment at the origin for an empty list.
    #[must_use]
    pub fn from_positions(positions: Vec<Position>, direction: Direction) -> Self {
        let mut body: VecDeque<Segment> = positions
            .into_iter()
            .map(|position| Segment {
                position,
                heading: None,
            })
            .collect();

        match body.front_mut() {
            Some(head) => head.heading = Some(Heading::from(direction)),
            None => body.push_back(Segment {
                position: Position::new(0, 0),
                heading: Some(Heading::STILL),
            }),
        }

        Self { body }
    }

    /// Returns the head segment.
    #[must_use]
    pub fn head(&self) -> Segment {
        self.body[0]
    }

    /// Returns the tail segment; equal to the head for a one-cell snake.
    #[must_use]
    pub fn tail(&self) -> Segment {
        self.body[self.body.len() - 1]
    }

    /// Returns the heading the head will move along on the next advance.
    #[must_use]
    pub fn heading(&self) -> Heading {
        self.head().heading.unwrap_or_default()
    }

    /// Overwrites the head heading. Takes effect on the next advance.
    pub fn set_heading(&mut self, heading: Heading) {
        self.body[0].heading = Some(heading);
    }

    /// Prepends a new head carrying the current heading and drops the tail
    /// unless `grow` is set.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        let heading = self.heading();
        self.body.push_front(Segment {
            position: new_head,
            heading: Some(heading),
        });

        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.positions().any(|segment| segment == position)
    }

    /// Returns true if any segment except the tail occupies `position`.
    #[must_use]
    pub fn occupies_excluding_tail(&self, position: Position) -> bool {
        self.positions()
            .take(self.body.len() - 1)
            .any(|segment| segment == position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    /// Iterates over body positions from head to tail.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().map(|segment| segment.position)
    }
}
