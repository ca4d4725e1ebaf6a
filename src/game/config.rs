use serde::{Deserialize, Serialize};

use super::error::WorldError;
use super::grid_math::in_bounds;
use super::state::Position;

/// Static obstacle layout of a world
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallLayout {
    /// No walls at all
    #[default]
    None,
    /// A ring of wall cells around the perimeter
    Border,
    /// An explicit list of wall cells
    Custom(Vec<Position>),
}

impl WallLayout {
    /// Expand the layout into concrete cells for a `grid_size × grid_size` grid
    pub fn cells(&self, grid_size: usize) -> Vec<Position> {
        match self {
            WallLayout::None => Vec::new(),
            WallLayout::Border => {
                let last = grid_size as i32 - 1;
                let mut cells = Vec::with_capacity(grid_size * 4);
                for i in 0..=last {
                    cells.push(Position::new(i, 0));
                    if last > 0 {
                        cells.push(Position::new(i, last));
                    }
                }
                for i in 1..last {
                    cells.push(Position::new(0, i));
                    cells.push(Position::new(last, i));
                }
                cells
            }
            WallLayout::Custom(cells) => cells.clone(),
        }
    }
}

/// Configuration for a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Cells per side of the square grid
    pub grid_size: usize,
    /// Display width of one cell in terminal columns (rendering only)
    pub cell_size: u16,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Whether stepping off one edge re-enters on the opposite edge
    pub wrap_around: bool,
    /// Lethal static cells
    pub walls: WallLayout,
    /// Seed for edible placement; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: 15,
            cell_size: 2,
            initial_snake_length: 3,
            wrap_around: false,
            walls: WallLayout::None,
            seed: None,
        }
    }
}

/// Largest accepted grid side; the occupancy grid is one flat allocation
pub const MAX_GRID_SIZE: usize = 1024;

impl WorldConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_wrap_around(mut self, wrap_around: bool) -> Self {
        self.wrap_around = wrap_around;
        self
    }

    pub fn with_walls(mut self, walls: WallLayout) -> Self {
        self.walls = walls;
        self
    }

    pub fn with_initial_length(mut self, length: usize) -> Self {
        self.initial_snake_length = length;
        self
    }

    /// Head cell of a freshly spawned snake
    pub fn spawn_position(&self) -> Position {
        let center = (self.grid_size / 2) as i32;
        Position::new(center, center)
    }

    /// Check the grid dimension and the wall layout
    pub fn validate_grid(&self) -> Result<(), WorldError> {
        if self.grid_size < 2 {
            return Err(WorldError::GridTooSmall(self.grid_size));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(WorldError::GridTooLarge(self.grid_size));
        }
        let walls = self.walls.cells(self.grid_size);
        if let Some(&cell) = walls.iter().find(|&&c| !in_bounds(c, self.grid_size)) {
            return Err(WorldError::WallOutOfBounds(cell));
        }
        Ok(())
    }

    /// Check everything a world needs to start in a valid state
    pub fn validate(&self) -> Result<(), WorldError> {
        self.validate_grid()?;
        if self.initial_snake_length == 0 {
            return Err(WorldError::EmptySnake);
        }
        let spawn = self.spawn_position();
        if self.initial_snake_length as i32 > spawn.x + 1 {
            return Err(WorldError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                grid_size: self.grid_size,
            });
        }

        let walls = self.walls.cells(self.grid_size);
        let spawn_cells: Vec<Position> = (0..self.initial_snake_length as i32)
            .map(|i| spawn.moved_by(-i, 0))
            .collect();
        if let Some(&cell) = walls.iter().find(|c| spawn_cells.contains(c)) {
            return Err(WorldError::WallOnSpawn(cell));
        }

        let mut distinct_walls = walls;
        distinct_walls.sort();
        distinct_walls.dedup();
        let free = self.grid_size * self.grid_size - distinct_walls.len();
        if free <= self.initial_snake_length {
            return Err(WorldError::NoRoomForEdible);
        }

        Ok(())
    }
}
