use std::time::{Duration, Instant};

use crate::game::CollisionType;

/// Session-level numbers shown next to the board
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub wall_deaths: u32,
    pub self_collisions: u32,
    pub boards_cleared: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            wall_deaths: 0,
            self_collisions: 0,
            boards_cleared: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Record a finished episode; `collision` is `None` when the board was cleared
    pub fn on_game_over(&mut self, final_score: u32, collision: Option<CollisionType>) {
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);

        match collision {
            Some(CollisionType::Wall) | Some(CollisionType::OutOfBounds) => self.wall_deaths += 1,
            Some(CollisionType::SelfCollision) => self.self_collisions += 1,
            None => self.boards_cleared += 1,
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10, Some(CollisionType::Wall));
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5, Some(CollisionType::SelfCollision));
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15, None);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_death_causes() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(0, Some(CollisionType::OutOfBounds));
        metrics.on_game_over(0, Some(CollisionType::Wall));
        metrics.on_game_over(0, Some(CollisionType::SelfCollision));

        assert_eq!(metrics.wall_deaths, 2);
        assert_eq!(metrics.self_collisions, 1);
        assert_eq!(metrics.boards_cleared, 0);

        metrics.on_game_over(98, None);
        assert_eq!(metrics.boards_cleared, 1);
    }
}
