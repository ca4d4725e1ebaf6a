//! Presentation collaborators.
//!
//! The simulation never draws anything itself. After a tick the environment
//! hands a shared borrow of the world to a [`Renderer`] and the current score
//! to a [`ScoreManager`]; both only read.

pub mod renderer;

pub use renderer::{draw_screen, GridRenderer, Scorecard};

use crate::game::World;

/// Turns a world snapshot into a displayable frame
pub trait Renderer {
    type Frame;

    fn render(&mut self, world: &World) -> Self::Frame;
}

/// Turns score and death counters into a displayable frame
pub trait ScoreManager {
    type Frame;

    fn update(&mut self, score: u32, deaths: u32) -> Self::Frame;
}

/// Renderer and score manager that produce nothing, for training runs
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl Renderer for Headless {
    type Frame = ();

    fn render(&mut self, _world: &World) -> Self::Frame {}
}

impl ScoreManager for Headless {
    type Frame = ();

    fn update(&mut self, _score: u32, _deaths: u32) -> Self::Frame {}
}
