use crate::game::grid_math::squared_distance;
use crate::game::World;

/// Dense shaping reward: negative squared distance from head to edible
///
/// Uses the raw (unwrapped) offset even when wraparound is enabled. There is no
/// bonus for eating and no penalty for dying at this layer.
pub fn reward(world: &World) -> f64 {
    -(squared_distance(world.snake_head_position(), world.edible_position()) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position, WorldConfig};

    fn world_at(head: Position, edible: Position) -> World {
        let mut world =
            World::from_snake(WorldConfig::new(15).with_seed(9), vec![head], Direction::Right)
                .unwrap();
        assert!(world.place_edible(edible));
        world
    }

    #[test]
    fn test_reward_is_negative_squared_distance() {
        assert_eq!(reward(&world_at(Position::new(5, 5), Position::new(9, 5))), -16.0);
        assert_eq!(reward(&world_at(Position::new(1, 2), Position::new(4, 6))), -25.0);
    }

    #[test]
    fn test_moving_closer_increases_reward() {
        let mut world = world_at(Position::new(5, 5), Position::new(9, 5));
        let before = reward(&world);

        world.update();
        let after = reward(&world);

        assert_eq!(world.snake_head_position(), Position::new(6, 5));
        assert_eq!(before, -16.0);
        assert_eq!(after, -9.0);
        assert!(after > before);
    }
}
