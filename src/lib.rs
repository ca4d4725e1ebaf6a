//! Grid Snake - a deterministic snake simulation with a learning-agent interface
//!
//! This library provides:
//! - Core simulation: grid, snake, edible, walls and the tick (game module)
//! - State encoding, reward, environment and a tabular Q-learning agent (rl module)
//! - Renderer/score collaborators and the TUI renderer (render module)
//! - Keyboard and scripted input sources (input module)
//! - Session and training metrics (metrics module)
//! - Execution modes: human, train, watch (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
