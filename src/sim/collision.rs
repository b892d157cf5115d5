//! Collision detection: world bounds and barriers
//!
//! Both checks are pure; the session decides what a hit means.

use super::field::ObstacleField;
use super::state::Entity;
use crate::consts::WORLD_HEIGHT;

/// True when the entity sits on (or past) the top or bottom of the world.
///
/// Stricter than the entity clamp: touching a bound ends the run the same tick.
pub fn world_bounds_violation(entity: &Entity) -> bool {
    entity.pos.y >= WORLD_HEIGHT || entity.pos.y <= 0.0
}

/// True when the entity hitbox overlaps any live barrier
pub fn obstacle_collision(entity: &Entity, field: &ObstacleField) -> bool {
    field.any_collides(entity)
}

/// Either terminal condition
pub fn is_terminal(entity: &Entity, field: &ObstacleField) -> bool {
    world_bounds_violation(entity) || obstacle_collision(entity, field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Obstacle;
    use glam::Vec2;

    fn entity_at(y: f32, vel: f32) -> Entity {
        Entity {
            pos: Vec2::new(ENTITY_X, y),
            vel,
            ..Default::default()
        }
    }

    #[test]
    fn test_world_bounds_inclusive() {
        assert!(world_bounds_violation(&entity_at(0.0, 0.0)));
        assert!(world_bounds_violation(&entity_at(WORLD_HEIGHT, 0.0)));
        assert!(!world_bounds_violation(&entity_at(0.01, 0.0)));
        assert!(!world_bounds_violation(&entity_at(WORLD_HEIGHT - 0.01, 0.0)));
    }

    #[test]
    fn test_world_bounds_ignores_velocity() {
        assert!(world_bounds_violation(&entity_at(0.0, -5.0)));
        assert!(world_bounds_violation(&entity_at(0.0, 5.0)));
        assert!(!world_bounds_violation(&entity_at(300.0, -5.0)));
        assert!(!world_bounds_violation(&entity_at(300.0, 5.0)));
    }

    #[test]
    fn test_obstacle_collision_delegates_to_field() {
        let mut field = ObstacleField::default();
        let entity = entity_at(100.0, 0.0);
        assert!(!obstacle_collision(&entity, &field));

        field
            .obstacles
            .push(Obstacle::with_gap(ENTITY_X, 200.0, WORLD_HEIGHT, BARRIER_WIDTH, GAP_SIZE, 3.0));
        assert!(obstacle_collision(&entity, &field));
        assert!(is_terminal(&entity, &field));
    }

    #[test]
    fn test_barrier_out_of_reach_horizontally() {
        let mut field = ObstacleField::default();
        field
            .obstacles
            .push(Obstacle::with_gap(ENTITY_X + ENTITY_RADIUS + 1.0, 200.0, WORLD_HEIGHT, BARRIER_WIDTH, GAP_SIZE, 3.0));
        assert!(!obstacle_collision(&entity_at(100.0, 0.0), &field));

        // Right edge of the hitbox touching the left edge of the barrier
        field.obstacles[0].x = ENTITY_X + ENTITY_RADIUS;
        assert!(obstacle_collision(&entity_at(100.0, 0.0), &field));
    }
}
