//! Training mode for the tabular Q-learning agent
//!
//! Runs episodes on a headless environment, feeding each transition to the
//! agent and logging rolling statistics every `log_frequency` episodes.
//!
//! # Example
//!
//! ```rust
//! use grid_snake::modes::{TrainConfig, TrainMode};
//!
//! let mut config = TrainConfig::new(5);
//! config.world_config = config.world_config.with_seed(7);
//! config.agent_config.seed = Some(7);
//!
//! let agent = TrainMode::new(config).unwrap().run().unwrap();
//! assert_eq!(agent.episodes(), 5);
//! ```

use anyhow::{ensure, Context, Result};
use tracing::info;

use crate::game::WorldConfig;
use crate::metrics::TrainingStats;
use crate::rl::{Environment, QLearningAgent, QLearningConfig};

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of episodes to train
    pub num_episodes: usize,

    /// Episodes are cut off after this many ticks
    pub max_steps_per_episode: usize,

    /// Log training progress every N episodes
    pub log_frequency: usize,

    /// Added to the reward of a transition that ends in death
    ///
    /// The distance reward alone makes dying look cheaper than wandering.
    pub death_penalty: f64,

    pub world_config: WorldConfig,

    pub agent_config: QLearningConfig,
}

impl TrainConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            max_steps_per_episode: 1_000,
            log_frequency: 100,
            death_penalty: -100.0,
            world_config: WorldConfig::default(),
            agent_config: QLearningConfig::default(),
        }
    }
}

/// Training mode for the Q-learning agent
pub struct TrainMode {
    agent: QLearningAgent,
    env: Environment,
    stats: TrainingStats,
    config: TrainConfig,
}

impl TrainMode {
    pub fn new(config: TrainConfig) -> Result<Self> {
        config
            .agent_config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid agent configuration")?;
        ensure!(config.log_frequency > 0, "log_frequency must be positive");
        ensure!(
            config.max_steps_per_episode > 0,
            "max_steps_per_episode must be positive"
        );

        let env = Environment::headless(config.world_config.clone())
            .context("Failed to create training world")?;

        Ok(Self {
            agent: QLearningAgent::new(config.agent_config.clone()),
            env,
            stats: TrainingStats::new(100),
            config,
        })
    }

    /// Train for the configured number of episodes and hand back the agent
    pub fn run(mut self) -> Result<QLearningAgent> {
        self.log_header();

        for episode in 0..self.config.num_episodes {
            let (episode_reward, episode_steps, episode_score) = self.run_episode();

            self.stats
                .record_episode(episode_reward, episode_steps, episode_score);
            self.agent.end_episode();
            self.stats
                .record_agent(self.agent.epsilon(), self.agent.known_states());

            if (episode + 1) % self.config.log_frequency == 0 {
                info!(
                    "[Episode {}/{}] {}",
                    episode + 1,
                    self.config.num_episodes,
                    self.stats.format_summary()
                );
            }
        }

        info!("Training complete: {}", self.stats.format_summary());

        Ok(self.agent)
    }

    /// Run a single training episode
    ///
    /// Returns the total reward, the number of ticks and the final score.
    fn run_episode(&mut self) -> (f64, usize, u32) {
        let (mut state, _) = self.env.reset();
        let mut episode_reward = 0.0;
        let mut episode_steps = 0;

        while episode_steps < self.config.max_steps_per_episode {
            let action = self.agent.select_action(&state);
            let (next_state, mut reward) = self.env.perform_move(action, false);

            let outcome = self.env.last_outcome();
            if outcome.death_count_delta > 0 {
                reward += self.config.death_penalty;
            }

            // A rejected reversal keeps the old heading; credit what was executed
            let executed = self.env.world().heading();
            self.agent
                .learn(&state, executed, reward, &next_state, outcome.game_over);

            episode_reward += reward;
            episode_steps += 1;
            state = next_state;

            if outcome.game_over {
                break;
            }
        }

        (episode_reward, episode_steps, self.env.world().score())
    }

    fn log_header(&self) {
        let world = &self.config.world_config;
        let agent = &self.config.agent_config;
        info!(
            episodes = self.config.num_episodes,
            grid_size = world.grid_size,
            wrap_around = world.wrap_around,
            walls = ?world.walls,
            "starting Q-learning training"
        );
        info!(
            learning_rate = agent.learning_rate,
            gamma = agent.gamma,
            epsilon_start = agent.epsilon_start,
            epsilon_min = agent.epsilon_min,
            epsilon_decay = agent.epsilon_decay,
            "agent configuration"
        );
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Sector};
    use crate::rl::{EncodedState, ObstacleSet};

    fn small_config(episodes: usize) -> TrainConfig {
        let mut config = TrainConfig::new(episodes);
        config.world_config = WorldConfig::small().with_seed(9);
        config.agent_config.seed = Some(9);
        config.max_steps_per_episode = 200;
        config
    }

    #[test]
    fn test_train_config_creation() {
        let config = TrainConfig::new(1000);
        assert_eq!(config.num_episodes, 1000);
        assert_eq!(config.log_frequency, 100);
        assert!(config.death_penalty < 0.0);
    }

    #[test]
    fn test_invalid_agent_config_rejected() {
        let mut config = small_config(1);
        config.agent_config.gamma = 2.0;
        assert!(TrainMode::new(config).is_err());
    }

    #[test]
    fn test_run_single_episode() {
        let mut mode = TrainMode::new(small_config(1)).unwrap();

        let (reward, steps, _score) = mode.run_episode();

        assert!(steps > 0);
        assert!(steps <= 200);
        assert!(reward < 0.0);
        assert!(mode.agent.known_states() > 0);
    }

    #[test]
    fn test_step_cap_ends_episode() {
        let mut config = small_config(1);
        config.max_steps_per_episode = 1;
        let mut mode = TrainMode::new(config).unwrap();

        let (_, steps, _) = mode.run_episode();
        assert_eq!(steps, 1);
    }

    #[test]
    fn test_rejected_reversal_credits_executed_heading() {
        let mut config = small_config(1);
        config.max_steps_per_episode = 1;
        config.agent_config.epsilon_start = 0.0;
        config.agent_config.epsilon_min = 0.0;
        let mut mode = TrainMode::new(config).unwrap();

        // Make Left the greedy pick in every open-field state; the spawned
        // snake heads Right, so Left is a reversal
        let left = Direction::Left.index().unwrap();
        let states: Vec<EncodedState> = Sector::ALL
            .into_iter()
            .map(|edible_sector| EncodedState {
                edible_sector,
                obstacles: ObstacleSet::empty(),
            })
            .collect();
        for state in &states {
            mode.agent.learn(state, Direction::Left, 100.0, state, true);
        }

        mode.run_episode();

        assert_eq!(mode.env.world().heading(), Direction::Right);
        // The rejected Left keeps its value; the update went to Right
        for state in &states {
            assert!((mode.agent.q_values(state)[left] - 10.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_run_decays_epsilon() {
        let agent = TrainMode::new(small_config(20)).unwrap().run().unwrap();

        assert_eq!(agent.episodes(), 20);
        assert!(agent.epsilon() < 1.0);
    }

    #[test]
    fn test_same_seed_same_table() {
        let a = TrainMode::new(small_config(10)).unwrap().run().unwrap();
        let b = TrainMode::new(small_config(10)).unwrap().run().unwrap();

        assert_eq!(a.known_states(), b.known_states());
        assert_eq!(a.epsilon(), b.epsilon());
    }
}
