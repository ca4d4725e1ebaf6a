//! Core game logic module for Snake
//!
//! This module contains all the simulation logic without any I/O or rendering
//! dependencies. It is driven the same way by a keyboard and by a learning agent.

pub mod action;
pub mod config;
pub mod error;
pub mod grid_math;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use action::Direction;
pub use config::{WallLayout, WorldConfig, MAX_GRID_SIZE};
pub use error::WorldError;
pub use grid_math::Sector;
pub use state::{CollisionType, Occupant, Position, Snake};
pub use world::{TickOutcome, World};
