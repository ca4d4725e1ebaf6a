//! Bookkeeping for play sessions and training runs; nothing here feeds back
//! into the simulation.

pub mod game_metrics;
pub mod training_stats;

pub use game_metrics::GameMetrics;
pub use training_stats::{EpisodeRecord, TrainingStats};
