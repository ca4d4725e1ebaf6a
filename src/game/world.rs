use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{
    action::Direction,
    config::WorldConfig,
    error::WorldError,
    grid_math::{in_bounds, is_adjacent, wrap_position},
    state::{CollisionType, Occupant, Position, Snake},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Points gained this tick (0 or 1)
    pub score_delta: u32,
    /// Deaths caused this tick (0 or 1)
    pub death_count_delta: u32,
    /// Whether the episode has ended
    pub game_over: bool,
    /// Whether the head landed on the edible
    pub ate_edible: bool,
    /// What the head ran into, if the snake died
    pub collision: Option<CollisionType>,
}

/// The simulation core: grid occupancy, the snake, the edible and walls.
///
/// A `World` is the only thing that mutates game state. Everything else
/// (encoders, renderers, score displays) reads it through the query methods.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    /// Row-major occupancy, `grid_size * grid_size` cells
    grid: Vec<Occupant>,
    walls: Vec<Position>,
    snake: Snake,
    /// Layout and heading restored by `reset`
    start: (Snake, Direction),
    edible: Position,
    heading: Direction,
    next_heading: Direction,
    score: u32,
    deaths: u32,
    steps: u32,
    game_over: bool,
    rng: StdRng,
}

impl World {
    /// Create a world with the snake at its spawn position
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let snake = Snake::new(
            config.spawn_position(),
            Direction::Right,
            config.initial_snake_length,
        );
        Self::build(config, snake, Direction::Right)
    }

    /// Create a world with an explicit head-first snake layout
    ///
    /// Useful for setting up scenarios; the edible is still placed at random.
    pub fn from_snake(
        config: WorldConfig,
        segments: Vec<Position>,
        heading: Direction,
    ) -> Result<Self, WorldError> {
        config.validate_grid()?;
        if heading.is_none() {
            return Err(WorldError::InvalidSnake("heading must be a cardinal direction"));
        }
        let size = config.grid_size;
        if segments.iter().any(|&s| !in_bounds(s, size)) {
            return Err(WorldError::InvalidSnake("segment outside the grid"));
        }
        let mut distinct = segments.clone();
        distinct.sort();
        distinct.dedup();
        if distinct.len() != segments.len() {
            return Err(WorldError::InvalidSnake("duplicate segment"));
        }
        if segments
            .windows(2)
            .any(|pair| !is_adjacent(pair[0], pair[1], size, config.wrap_around))
        {
            return Err(WorldError::InvalidSnake("segments are not connected"));
        }
        let walls = config.walls.cells(size);
        if let Some(&cell) = walls.iter().find(|c| segments.contains(c)) {
            return Err(WorldError::WallOnSpawn(cell));
        }

        let snake = Snake::from_segments(segments).ok_or(WorldError::EmptySnake)?;
        Self::build(config, snake, heading)
    }

    fn build(config: WorldConfig, snake: Snake, heading: Direction) -> Result<Self, WorldError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let size = config.grid_size;
        let mut walls = config.walls.cells(size);
        walls.sort();
        walls.dedup();

        let mut world = Self {
            grid: vec![Occupant::Empty; size * size],
            walls,
            edible: snake.head(),
            start: (snake.clone(), heading),
            snake,
            heading,
            next_heading: heading,
            score: 0,
            deaths: 0,
            steps: 0,
            game_over: false,
            rng,
            config,
        };

        world.fill_grid();
        if !world.place_edible_randomly() {
            return Err(WorldError::NoRoomForEdible);
        }

        debug!(
            grid_size = size,
            walls = world.walls.len(),
            wrap_around = world.config.wrap_around,
            "world created"
        );
        Ok(world)
    }

    /// Put the snake back where this world started and begin a new episode
    ///
    /// That is the spawn layout for [`World::new`] and the given layout for
    /// [`World::from_snake`], both validated at construction. Score, step
    /// count and the latched heading are reset; the cumulative death count and
    /// the random stream carry over. The grid is refilled in place.
    pub fn reset(&mut self) {
        let (snake, heading) = self.start.clone();
        self.snake = snake;
        self.heading = heading;
        self.next_heading = heading;
        self.score = 0;
        self.steps = 0;
        self.game_over = false;

        self.fill_grid();
        self.place_edible_randomly();

        debug!(deaths = self.deaths, "world reset");
    }

    /// Latch the heading for the next tick
    ///
    /// `None` keeps whatever is latched. A reversal of the current heading is
    /// dropped while the snake is longer than one cell.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction.is_none() {
            return;
        }
        if self.snake.len() > 1 && self.heading.is_opposite(direction) {
            trace!(?direction, heading = ?self.heading, "reversal ignored");
            return;
        }
        self.next_heading = direction;
    }

    /// Advance the simulation by one step
    pub fn update(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome {
                game_over: true,
                ..Default::default()
            };
        }

        self.heading = self.next_heading;
        self.steps += 1;

        let mut next_head = self.snake.head().moved_in_direction(self.heading);
        if self.config.wrap_around {
            next_head = wrap_position(next_head, self.config.grid_size);
        }

        if let Some(collision) = self.check_collision(next_head) {
            self.game_over = true;
            self.deaths += 1;
            debug!(
                ?collision,
                score = self.score,
                length = self.snake.len(),
                steps = self.steps,
                "snake died"
            );
            return TickOutcome {
                death_count_delta: 1,
                game_over: true,
                collision: Some(collision),
                ..Default::default()
            };
        }

        let ate_edible = next_head == self.edible;

        if let Some(tail) = self.snake.advance(next_head, ate_edible) {
            let idx = self.index(tail);
            self.grid[idx] = Occupant::Empty;
        }
        let idx = self.index(next_head);
        self.grid[idx] = Occupant::SnakeSegment;

        let mut outcome = TickOutcome {
            ate_edible,
            ..Default::default()
        };

        if ate_edible {
            self.score += 1;
            outcome.score_delta = 1;

            if !self.place_edible_randomly() {
                debug!(score = self.score, "board cleared");
                self.game_over = true;
                outcome.game_over = true;
            }
        }

        outcome
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !in_bounds(pos, self.config.grid_size) {
            return Some(CollisionType::OutOfBounds);
        }

        if self.grid[self.index(pos)] == Occupant::Wall {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_ignoring_tail(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Rebuild occupancy from walls and snake; leaves the edible out
    fn fill_grid(&mut self) {
        self.grid.fill(Occupant::Empty);
        for i in 0..self.walls.len() {
            let idx = self.index(self.walls[i]);
            self.grid[idx] = Occupant::Wall;
        }
        for i in 0..self.snake.len() {
            let idx = self.index(self.snake.segments()[i]);
            self.grid[idx] = Occupant::SnakeSegment;
        }
    }

    /// Move the edible to a uniformly random empty cell
    ///
    /// Returns false when no empty cell is left; the edible is then unchanged.
    fn place_edible_randomly(&mut self) -> bool {
        let empty: Vec<usize> = self
            .grid
            .iter()
            .enumerate()
            .filter(|(_, occupant)| occupant.is_empty())
            .map(|(idx, _)| idx)
            .collect();

        match empty.choose(&mut self.rng) {
            Some(&idx) => {
                self.set_edible_cell(self.position_of(idx));
                trace!(x = self.edible.x, y = self.edible.y, "edible placed");
                true
            }
            None => false,
        }
    }

    fn set_edible_cell(&mut self, pos: Position) {
        let old = self.index(self.edible);
        if self.grid[old] == Occupant::Edible {
            self.grid[old] = Occupant::Empty;
        }
        self.edible = pos;
        let idx = self.index(pos);
        self.grid[idx] = Occupant::Edible;
    }

    /// Move the edible onto a specific empty cell
    ///
    /// Returns false (and changes nothing) if the cell is off the grid or held
    /// by a wall or the snake.
    pub fn place_edible(&mut self, pos: Position) -> bool {
        match self.occupant_at(pos) {
            Some(Occupant::Edible) => true,
            Some(Occupant::Empty) => {
                self.set_edible_cell(pos);
                true
            }
            _ => false,
        }
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.config.grid_size + pos.x as usize
    }

    fn position_of(&self, idx: usize) -> Position {
        let size = self.config.grid_size;
        Position::new((idx % size) as i32, (idx / size) as i32)
    }

    pub fn snake_head_position(&self) -> Position {
        self.snake.head()
    }

    pub fn edible_position(&self) -> Position {
        self.edible
    }

    /// Occupant of a cell, or `None` for cells off the grid
    pub fn occupant_at(&self, pos: Position) -> Option<Occupant> {
        if in_bounds(pos, self.config.grid_size) {
            Some(self.grid[self.index(pos)])
        } else {
            None
        }
    }

    /// Every non-empty cell with its occupant, in row-major order
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Position, Occupant)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, occupant)| !occupant.is_empty())
            .map(|(idx, &occupant)| (self.position_of(idx), occupant))
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn walls(&self) -> &[Position] {
        &self.walls
    }

    /// Heading used by the most recent tick
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Heading the next tick will use
    pub fn next_heading(&self) -> Direction {
        self.next_heading
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Deaths across every episode of this world
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Ticks taken in the current episode
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}
