use serde::{Deserialize, Serialize};

/// A move request for one tick.
///
/// `None` means "keep the current heading". Raw input codes never reach the
/// simulation; every input source maps into this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// The four headings a snake can actually travel in
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    ///
    /// Screen convention: y grows downwards. `None` has no delta of its own.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Direction::None)
    }

    /// Discrete action index used by agents (0..4), `None` has no index
    pub fn index(&self) -> Option<usize> {
        Direction::CARDINAL.iter().position(|d| d == self)
    }

    /// Inverse of [`Direction::index`]; out-of-range indices map to `None`
    pub fn from_index(idx: usize) -> Direction {
        Direction::CARDINAL
            .get(idx)
            .copied()
            .unwrap_or(Direction::None)
    }
}
