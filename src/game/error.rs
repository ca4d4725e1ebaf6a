use thiserror::Error;

use super::config::MAX_GRID_SIZE;
use super::state::Position;

/// Errors that can occur when constructing a world
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("grid must be at least 2 cells per side, got {0}")]
    GridTooSmall(usize),
    #[error("grid of {0} cells per side exceeds the limit of {max}", max = MAX_GRID_SIZE)]
    GridTooLarge(usize),
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("initial snake of length {length} does not fit a {grid_size}x{grid_size} grid")]
    SnakeDoesNotFit { length: usize, grid_size: usize },
    #[error("wall cell ({}, {}) lies outside the grid", .0.x, .0.y)]
    WallOutOfBounds(Position),
    #[error("wall cell ({}, {}) overlaps the starting snake", .0.x, .0.y)]
    WallOnSpawn(Position),
    #[error("invalid snake layout: {0}")]
    InvalidSnake(&'static str),
    #[error("no free cell left for the edible")]
    NoRoomForEdible,
}
