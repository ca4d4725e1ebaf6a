//! Learning-agent side of the simulation
//!
//! Provides:
//! - a compact, hashable state encoding of a world snapshot
//! - the dense distance-based reward
//! - the environment that sequences a move into a tick, side channels and
//!   an `(EncodedState, reward)` observation
//! - a tabular Q-learning agent keyed by the encoded state

pub mod agent;
pub mod config;
pub mod environment;
pub mod observation;
pub mod reward;

pub use agent::QLearningAgent;
pub use config::QLearningConfig;
pub use environment::Environment;
pub use observation::{encode_state, EncodedState, ObstacleOffset, ObstacleSet};
pub use reward::reward;
