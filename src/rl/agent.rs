use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use super::config::QLearningConfig;
use super::observation::EncodedState;
use crate::game::Direction;

const ACTIONS: usize = Direction::CARDINAL.len();

/// Epsilon-greedy tabular Q-learning over encoded states
///
/// The value table maps every [`EncodedState`] seen so far to one value per
/// cardinal direction. Unseen states read as all zeros.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    config: QLearningConfig,
    table: HashMap<EncodedState, [f64; ACTIONS]>,
    epsilon: f64,
    episodes: usize,
    rng: StdRng,
}

impl QLearningAgent {
    pub fn new(config: QLearningConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            epsilon: config.epsilon_start,
            table: HashMap::new(),
            episodes: 0,
            rng,
            config,
        }
    }

    /// Action values for a state
    pub fn q_values(&self, state: &EncodedState) -> [f64; ACTIONS] {
        self.table.get(state).copied().unwrap_or([0.0; ACTIONS])
    }

    /// Best known action; ties go to the earliest direction in
    /// [`Direction::CARDINAL`]
    pub fn greedy_action(&self, state: &EncodedState) -> Direction {
        let values = self.q_values(state);
        let mut best = 0;
        for (idx, &value) in values.iter().enumerate().skip(1) {
            if value > values[best] {
                best = idx;
            }
        }
        Direction::from_index(best)
    }

    /// Explore with probability epsilon, otherwise act greedily
    pub fn select_action(&mut self, state: &EncodedState) -> Direction {
        if self.rng.gen_bool(self.epsilon) {
            Direction::from_index(self.rng.gen_range(0..ACTIONS))
        } else {
            self.greedy_action(state)
        }
    }

    /// One temporal-difference update
    ///
    /// `Direction::None` carries no action index and is ignored.
    pub fn learn(
        &mut self,
        state: &EncodedState,
        action: Direction,
        reward: f64,
        next_state: &EncodedState,
        done: bool,
    ) {
        let Some(action_idx) = action.index() else {
            return;
        };

        let target = if done {
            reward
        } else {
            let next_best = self
                .q_values(next_state)
                .into_iter()
                .fold(f64::NEG_INFINITY, f64::max);
            reward + self.config.gamma * next_best
        };

        let values = self.table.entry(*state).or_insert([0.0; ACTIONS]);
        values[action_idx] += self.config.learning_rate * (target - values[action_idx]);
    }

    /// Decay exploration at the end of an episode
    pub fn end_episode(&mut self) {
        self.episodes += 1;
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of distinct states in the value table
    pub fn known_states(&self) -> usize {
        self.table.len()
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Sector;
    use crate::rl::observation::{ObstacleOffset, ObstacleSet};

    fn state(sector: Sector) -> EncodedState {
        EncodedState {
            edible_sector: sector,
            obstacles: ObstacleSet::empty(),
        }
    }

    fn agent() -> QLearningAgent {
        QLearningAgent::new(QLearningConfig {
            seed: Some(11),
            ..Default::default()
        })
    }

    #[test]
    fn test_unseen_state_reads_zero() {
        let agent = agent();
        assert_eq!(agent.q_values(&state(Sector::Q0)), [0.0; ACTIONS]);
        assert_eq!(agent.known_states(), 0);
        assert_eq!(agent.greedy_action(&state(Sector::Q0)), Direction::Up);
    }

    #[test]
    fn test_terminal_update_moves_toward_reward() {
        let mut agent = agent();
        let s = state(Sector::PlusX);

        agent.learn(&s, Direction::Right, 10.0, &s, true);

        let values = agent.q_values(&s);
        assert!((values[3] - 1.0).abs() < 1e-12);
        assert_eq!(agent.greedy_action(&s), Direction::Right);
        assert_eq!(agent.known_states(), 1);
    }

    #[test]
    fn test_bootstrapped_update_uses_next_state() {
        let mut agent = agent();
        let s = state(Sector::PlusX);
        let next = state(Sector::PlusY);
        agent.learn(&next, Direction::Down, 10.0, &next, true);

        agent.learn(&s, Direction::Right, 0.0, &next, false);

        // 0.1 * (0 + 0.9 * 1.0)
        assert!((agent.q_values(&s)[3] - 0.09).abs() < 1e-12);
    }

    #[test]
    fn test_none_action_is_ignored() {
        let mut agent = agent();
        let s = state(Sector::Q3);
        agent.learn(&s, Direction::None, 5.0, &s, true);
        assert_eq!(agent.known_states(), 0);
    }

    #[test]
    fn test_obstacles_distinguish_states() {
        let mut agent = agent();
        let open = state(Sector::PlusX);
        let blocked = EncodedState {
            edible_sector: Sector::PlusX,
            obstacles: [ObstacleOffset::PlusX].into_iter().collect(),
        };

        agent.learn(&blocked, Direction::Right, -50.0, &blocked, true);

        assert_eq!(agent.q_values(&open), [0.0; ACTIONS]);
        assert!(agent.q_values(&blocked)[3] < 0.0);
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let mut agent = QLearningAgent::new(QLearningConfig {
            epsilon_start: 1.0,
            epsilon_min: 0.5,
            epsilon_decay: 0.5,
            seed: Some(1),
            ..Default::default()
        });

        agent.end_episode();
        assert!((agent.epsilon() - 0.5).abs() < 1e-12);
        agent.end_episode();
        assert!((agent.epsilon() - 0.5).abs() < 1e-12);
        assert_eq!(agent.episodes(), 2);
    }

    #[test]
    fn test_zero_epsilon_is_greedy() {
        let mut agent = QLearningAgent::new(QLearningConfig {
            epsilon_start: 0.0,
            epsilon_min: 0.0,
            seed: Some(2),
            ..Default::default()
        });
        let s = state(Sector::MinusY);
        agent.learn(&s, Direction::Left, 3.0, &s, true);

        for _ in 0..20 {
            assert_eq!(agent.select_action(&s), Direction::Left);
        }
    }
}
