//! Tabular Q-learning hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the tabular Q-learning agent
///
/// Default values are tuned for the 15×15 board with the dense distance
/// reward, where the encoded state space is at most 8 × 2⁶ = 512 entries.
///
/// # Example
///
/// ```rust
/// use grid_snake::rl::QLearningConfig;
///
/// // Use default hyperparameters
/// let config = QLearningConfig::default();
///
/// // Or customize specific parameters
/// let config = QLearningConfig {
///     learning_rate: 0.5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Step size for the temporal-difference update (alpha)
    ///
    /// Default: 0.1
    pub learning_rate: f64,

    /// Discount factor for future rewards (gamma)
    ///
    /// Values closer to 1.0 make the agent more far-sighted.
    ///
    /// Default: 0.9
    pub gamma: f64,

    /// Initial probability of taking a random action
    ///
    /// Default: 1.0
    pub epsilon_start: f64,

    /// Floor for the exploration rate
    ///
    /// Default: 0.01
    pub epsilon_min: f64,

    /// Multiplicative decay applied to epsilon after every episode
    ///
    /// Default: 0.995
    pub epsilon_decay: f64,

    /// Seed for exploration; `None` seeds from entropy
    ///
    /// Default: None
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            gamma: 0.9,
            epsilon_start: 1.0,
            epsilon_min: 0.01,
            epsilon_decay: 0.995,
            seed: None,
        }
    }
}

impl QLearningConfig {
    /// Check that every hyperparameter lies in its meaningful range
    pub fn validate(&self) -> Result<(), String> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in [0, 1], got {}", self.gamma));
        }
        if !(0.0..=1.0).contains(&self.epsilon_min) || !(0.0..=1.0).contains(&self.epsilon_start)
        {
            return Err("epsilon_start and epsilon_min must be in [0, 1]".to_string());
        }
        if self.epsilon_min > self.epsilon_start {
            return Err(format!(
                "epsilon_min ({}) must not exceed epsilon_start ({})",
                self.epsilon_min, self.epsilon_start
            ));
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(format!(
                "epsilon_decay must be in (0, 1], got {}",
                self.epsilon_decay
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = QLearningConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.gamma, 0.9);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = QLearningConfig {
            learning_rate: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = QLearningConfig {
            gamma: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = QLearningConfig {
            epsilon_start: 0.1,
            epsilon_min: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_fills_missing_fields() {
        let config: QLearningConfig = serde_json::from_str(r#"{"gamma": 0.5}"#).unwrap();
        assert_eq!(config.gamma, 0.5);
        assert_eq!(config.learning_rate, 0.1);
    }
}
