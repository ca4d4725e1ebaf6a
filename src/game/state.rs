use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// What a single grid cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    Empty,
    SnakeSegment,
    Edible,
    Wall,
}

impl Occupant {
    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    /// True for anything the snake dies on
    pub fn is_lethal(&self) -> bool {
        matches!(self, Occupant::SnakeSegment | Occupant::Wall)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body }
    }

    /// Build a snake from explicit head-first segments
    ///
    /// Returns `None` for an empty segment list.
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { body: segments })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// True if `pos` hits the snake once the tail has moved out of the way
    pub fn collides_ignoring_tail(&self, pos: Position) -> bool {
        self.body[..self.body.len() - 1].contains(&pos)
    }

    /// Put a new head in front; drop the tail unless growing
    ///
    /// Returns the vacated tail cell, if any.
    pub fn advance(&mut self, new_head: Position, grow: bool) -> Option<Position> {
        self.body.insert(0, new_head);

        if grow {
            None
        } else {
            self.body.pop()
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Head left the grid with wraparound disabled
    OutOfBounds,
    /// Snake hit a wall cell
    Wall,
    /// Snake hit itself
    SelfCollision,
}
