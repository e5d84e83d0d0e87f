use std::collections::{HashSet, VecDeque};
use std::iter;

use crate::grid::{Cell, GridGeometry};
use crate::input::{Direction, direction_change_is_valid};

/// Why a round ended in a game over.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Mutable snake state and movement buffering behavior.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    origin: Cell,
    start_size: usize,
}

impl Snake {
    /// Direction every round starts with.
    pub const START_DIRECTION: Direction = Direction::Down;

    /// Creates a snake of `start_size` segments stacked on `origin`.
    #[must_use]
    pub fn new(origin: Cell, start_size: usize) -> Self {
        debug_assert!(start_size > 0);

        let mut snake = Self {
            body: VecDeque::with_capacity(start_size),
            direction: Self::START_DIRECTION,
            pending_direction: None,
            origin,
            start_size,
        };
        snake.reset();
        snake
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            origin: segments[0],
            start_size: segments.len(),
            body: VecDeque::from(segments),
            direction,
            pending_direction: None,
        }
    }

    /// Restores the start-of-round body and direction state.
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.extend(iter::repeat_n(self.origin, self.start_size));
        self.direction = Self::START_DIRECTION;
        self.pending_direction = None;
    }

    /// Buffers `direction` for the next advance.
    ///
    /// Reversals of the current direction are dropped. Otherwise the last
    /// request before a tick wins; nothing is queued beyond one value.
    pub fn request_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Applies the pending turn and pushes a new head one step ahead.
    ///
    /// The tail is left in place; callers pick [`Snake::trim_tail`] for a
    /// plain move or keep it for growth.
    pub fn advance(&mut self) -> Cell {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let next_head = self.head().step(self.direction);
        self.body.push_front(next_head);
        next_head
    }

    /// Drops the last segment, completing a move without growth.
    pub fn trim_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    /// Returns what the head has run into, walls checked first.
    #[must_use]
    pub fn collision(&self, geometry: &GridGeometry) -> Option<DeathReason> {
        if !geometry.is_in_bounds(self.head()) {
            return Some(DeathReason::WallCollision);
        }
        if self.head_overlaps_body() {
            return Some(DeathReason::SelfCollision);
        }
        None
    }

    /// Returns true if the head is off the board or on another segment.
    #[must_use]
    pub fn check_self_or_wall_collision(&self, geometry: &GridGeometry) -> bool {
        self.collision(geometry).is_some()
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Distinct cells covered by the body.
    #[must_use]
    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Returns current segment count, stacked segments included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction applied on the last advance.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
