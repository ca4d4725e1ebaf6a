//! Rolling statistics for value-table training runs

use std::collections::VecDeque;

/// One finished episode as seen by the trainer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeRecord {
    /// Summed reward over the episode's ticks
    pub reward: f64,
    /// Ticks played
    pub length: usize,
    /// Edibles eaten
    pub score: u32,
}

/// Rolling averages over the most recent episodes plus run-wide totals
///
/// Also carries the agent's exploration rate and value table size as of the
/// last recorded episode.
///
/// # Example
///
/// ```rust
/// use grid_snake::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
/// stats.record_episode(-420.0, 150, 5);
/// stats.record_agent(0.25, 37);
///
/// assert_eq!(stats.total_episodes(), 1);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    recent: VecDeque<EpisodeRecord>,
    capacity: usize,
    epsilon: f64,
    known_states: usize,
    best_score: u32,
    episodes_seen: usize,
    steps_seen: usize,
}

impl TrainingStats {
    /// Averages cover the last `window_size` episodes (at least one)
    pub fn new(window_size: usize) -> Self {
        let capacity = window_size.max(1);
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
            epsilon: 0.0,
            known_states: 0,
            best_score: 0,
            episodes_seen: 0,
            steps_seen: 0,
        }
    }

    pub fn record_episode(&mut self, reward: f64, length: usize, score: u32) {
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(EpisodeRecord {
            reward,
            length,
            score,
        });

        self.best_score = self.best_score.max(score);
        self.episodes_seen += 1;
        self.steps_seen += length;
    }

    /// Snapshot of the agent after an episode
    pub fn record_agent(&mut self, epsilon: f64, known_states: usize) {
        self.epsilon = epsilon;
        self.known_states = known_states;
    }

    /// Episodes currently inside the averaging window, oldest first
    pub fn recent(&self) -> impl Iterator<Item = &EpisodeRecord> {
        self.recent.iter()
    }

    pub fn mean_episode_reward(&self) -> f64 {
        self.window_mean(|r| r.reward)
    }

    pub fn mean_episode_length(&self) -> f64 {
        self.window_mean(|r| r.length as f64)
    }

    pub fn mean_episode_score(&self) -> f64 {
        self.window_mean(|r| r.score as f64)
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn known_states(&self) -> usize {
        self.known_states
    }

    pub fn total_episodes(&self) -> usize {
        self.episodes_seen
    }

    pub fn total_steps(&self) -> usize {
        self.steps_seen
    }

    pub fn window_size(&self) -> usize {
        self.capacity
    }

    /// One-line summary for progress logs
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.1} | Score: {:.2} | Best: {} | Len: {:.1} | Epsilon: {:.3} | States: {}",
            self.episodes_seen,
            self.steps_seen,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.best_score,
            self.mean_episode_length(),
            self.epsilon,
            self.known_states,
        )
    }

    fn window_mean(&self, field: impl Fn(&EpisodeRecord) -> f64) -> f64 {
        if self.recent.is_empty() {
            return 0.0;
        }
        self.recent.iter().map(field).sum::<f64>() / self.recent.len() as f64
    }
}
