//! Sources of per-tick move requests.

pub mod handler;

pub use handler::{InputHandler, KeyAction};

use std::collections::VecDeque;

use crate::game::Direction;

/// Yields one move request per tick
pub trait InputSource {
    fn next_direction(&mut self) -> Direction;
}

/// Keyboard-fed source: the latest press since the last tick wins
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    pending: Option<Direction>,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

impl InputSource for KeyboardInput {
    fn next_direction(&mut self) -> Direction {
        self.pending.take().unwrap_or(Direction::None)
    }
}

/// Replays a fixed sequence of moves, then keeps going straight
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    moves: VecDeque<Direction>,
}

impl ScriptedInput {
    pub fn new(moves: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_direction(&mut self) -> Direction {
        self.moves.pop_front().unwrap_or(Direction::None)
    }
}
