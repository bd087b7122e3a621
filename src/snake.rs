use std::collections::VecDeque;

use crate::config::Grid;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the grid.
    #[must_use]
    pub fn is_within_bounds(self, grid: Grid) -> bool {
        let size = i32::from(grid.tile_count);
        self.x >= 0 && self.y >= 0 && self.x < size && self.y < size
    }

    /// Returns this position moved by one step of `velocity`.
    #[must_use]
    pub fn offset(self, velocity: Velocity) -> Self {
        Self {
            x: self.x + velocity.dx,
            y: self.y + velocity.dy,
        }
    }
}

/// Cells moved per step along each axis.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

impl From<Direction> for Velocity {
    fn from(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { dx, dy }
    }
}

/// Snake body plus the velocity it moves with.
///
/// Input only ever writes `pending`; a step commits it into `current` before
/// moving, so a request arriving mid-step takes effect on the next one.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    current: Velocity,
    pending: Velocity,
}

impl Snake {
    /// Creates a one-cell, motionless snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            body: VecDeque::from([start]),
            current: Velocity::ZERO,
            pending: Velocity::ZERO,
        }
    }

    /// Creates a snake from explicit body segments (front is head) that is
    /// already moving with `velocity`.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, velocity: Velocity) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            current: velocity,
            pending: velocity,
        }
    }

    /// Requests a direction for the next step.
    ///
    /// Returns `false`, leaving the pending velocity untouched, when the
    /// direction is the exact reverse of the current velocity.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        let requested = Velocity::from(direction);
        if requested == self.current.reversed() {
            return false;
        }

        self.pending = requested;
        true
    }

    /// Makes the pending velocity current. Returns the committed velocity.
    pub fn commit_velocity(&mut self) -> Velocity {
        self.current = self.pending;
        self.current
    }

    /// Pushes a new head one step along the current velocity.
    pub fn push_head(&mut self) -> Position {
        let next = self.head().offset(self.current);
        self.body.push_front(next);
        next
    }

    /// Drops the last segment, keeping at least the head.
    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    /// Shortens the body to at most `len` segments; never grows it.
    pub fn truncate(&mut self, len: usize) {
        self.body.truncate(len.max(1));
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn velocity(&self) -> Velocity {
        self.current
    }

    #[must_use]
    pub fn pending_velocity(&self) -> Velocity {
        self.pending
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
