//! Live obstacle collection: spawning, scrolling, scoring and pruning

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Entity, Obstacle};
use crate::consts::*;

/// Ordered obstacles (spawn order = left-to-right screen order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    /// Tick of the most recent spawn (session start counts as a spawn)
    pub last_spawn_tick: u64,
}

impl ObstacleField {
    pub fn new(start_tick: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            last_spawn_tick: start_tick,
        }
    }

    /// Spawn a new obstacle once more than the spawn interval has elapsed.
    /// Returns true if an obstacle was added.
    pub fn maybe_spawn(&mut self, now: u64, current_speed: u32, rng: &mut Pcg32) -> bool {
        if now.saturating_sub(self.last_spawn_tick) <= SPAWN_INTERVAL_TICKS {
            return false;
        }

        let obstacle = Obstacle::new(WORLD_HEIGHT, BARRIER_WIDTH, GAP_SIZE, current_speed as f32, rng);
        log::debug!(
            "Spawned obstacle at tick {} (gap_top={}, speed={})",
            now,
            obstacle.gap_top,
            current_speed
        );
        self.obstacles.push(obstacle);
        self.last_spawn_tick = now;
        true
    }

    /// Scroll every obstacle once, count newly passed ones, then drop the off-screen ones.
    ///
    /// An obstacle spawned this tick keeps its spawn position until the next pass.
    pub fn advance_and_prune(&mut self, entity_x: f32) -> u32 {
        let mut passed = 0;

        for obstacle in &mut self.obstacles {
            if obstacle.age_ticks > 0 {
                obstacle.update();
            }
            obstacle.age_ticks = obstacle.age_ticks.saturating_add(1);

            if !obstacle.passed && obstacle.x < entity_x {
                obstacle.passed = true;
                passed += 1;
            }
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_off_screen());
        let removed = before - self.obstacles.len();
        if removed > 0 {
            log::trace!("Pruned {} obstacles", removed);
        }

        passed
    }

    /// True if the entity hitbox overlaps any barrier
    pub fn any_collides(&self, entity: &Entity) -> bool {
        let hitbox = entity.bounding_region();
        self.obstacles
            .iter()
            .any(|o| o.solid_spans().iter().any(|span| span.intersects(&hitbox)))
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
