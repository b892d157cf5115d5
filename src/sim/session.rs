//! A single play-through: fixed-step update of entity, obstacles, score and speed

use rand_pcg::Pcg32;

use super::collision;
use super::field::ObstacleField;
use super::state::{Entity, RngState};
use crate::consts::*;

/// Autopilot jumps once the entity falls this far below the gap center
const AUTOPILOT_SLACK: f32 = 15.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/tap)
    pub jump: bool,
    /// Demo mode - the session steers itself
    pub autopilot: bool,
}

/// Result of one session tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub alive: bool,
    pub score: u32,
}

/// One run from Start to death
#[derive(Debug, Clone)]
pub struct GameSession {
    pub entity: Entity,
    pub field: ObstacleField,
    pub score: u32,
    /// Scroll speed handed to newly spawned obstacles
    pub speed: u32,
    /// Score at the most recent speed increase
    pub last_speed_increase: u32,
    /// Simulation tick counter (starts at 0)
    pub time_ticks: u64,
    pub rng_state: RngState,
    rng: Pcg32,
    /// Jump forwarded by the state machine, applied on the next tick
    pending_jump: bool,
    ended: bool,
}

impl GameSession {
    pub fn new(rng_state: RngState) -> Self {
        log::info!(
            "New session (seed={}, stream={})",
            rng_state.seed,
            rng_state.stream
        );
        Self {
            entity: Entity::default(),
            field: ObstacleField::new(0),
            score: 0,
            speed: INITIAL_SPEED,
            last_speed_increase: 0,
            time_ticks: 0,
            rng_state,
            rng: rng_state.to_rng(),
            pending_jump: false,
            ended: false,
        }
    }

    /// Queue a jump for the next tick
    pub fn queue_jump(&mut self) {
        self.pending_jump = true;
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Advance the session by one fixed tick
    pub fn update(&mut self, input: &TickInput) -> TickOutcome {
        if self.ended {
            return self.outcome();
        }

        self.time_ticks += 1;

        // Input first so a jump affects this tick's integration
        let queued = std::mem::take(&mut self.pending_jump);
        let jump = input.jump || queued || (input.autopilot && self.autopilot_wants_jump());
        if jump {
            self.entity.jump();
        }

        self.entity.update();

        self.field.maybe_spawn(self.time_ticks, self.speed, &mut self.rng);

        self.score += self.field.advance_and_prune(self.entity.pos.x);

        // At most one step per tick, even when several obstacles were passed at once
        if self.score - self.last_speed_increase >= POINTS_PER_SPEED_STEP {
            self.speed += 1;
            self.last_speed_increase = self.score;
            log::debug!("Speed up to {} at score {}", self.speed, self.score);
        }

        if collision::is_terminal(&self.entity, &self.field) {
            self.ended = true;
            log::info!(
                "Session ended at tick {} with score {}",
                self.time_ticks,
                self.score
            );
        }

        log::trace!(
            "tick {}: y={:.2} vel={:.2} obstacles={}",
            self.time_ticks,
            self.entity.pos.y,
            self.entity.vel,
            self.field.len()
        );

        self.outcome()
    }

    fn outcome(&self) -> TickOutcome {
        TickOutcome {
            alive: !self.ended,
            score: self.score,
        }
    }

    /// Steer toward the gap of the nearest obstacle the entity has not cleared yet
    fn autopilot_wants_jump(&self) -> bool {
        let entity = &self.entity;
        let target_y = self
            .field
            .obstacles
            .iter()
            .find(|o| o.x + o.width >= entity.pos.x - entity.radius)
            .map(|o| o.gap_top + o.gap_size / 2.0)
            .unwrap_or(WORLD_HEIGHT / 2.0);

        entity.vel >= 0.0 && entity.pos.y > target_y + AUTOPILOT_SLACK
    }
}
