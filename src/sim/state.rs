//! Core simulation types: the falling entity and the gated obstacles
//!
//! Screen space: y grows downward, so gravity is positive and a jump is negative.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// The player-controlled falling entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Center position (x never changes during a session)
    pub pos: Vec2,
    /// Vertical velocity in units per tick (positive = falling)
    pub vel: f32,
    pub radius: f32,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            pos: Vec2::new(ENTITY_X, WORLD_HEIGHT / 2.0),
            vel: 0.0,
            radius: ENTITY_RADIUS,
        }
    }
}

impl Entity {
    /// Replace the current velocity with the upward impulse
    pub fn jump(&mut self) {
        self.vel = JUMP_IMPULSE;
    }

    /// Integrate one tick of gravity and clamp to the world
    pub fn update(&mut self) {
        self.vel += GRAVITY;
        self.pos.y += self.vel;

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel = 0.0;
        }
        if self.pos.y > WORLD_HEIGHT {
            self.pos.y = WORLD_HEIGHT;
            self.vel = 0.0;
        }
    }

    /// Square hitbox used for collision
    pub fn bounding_region(&self) -> Rect {
        Rect::from_center(self.pos, self.radius)
    }
}

/// A pair of barriers with a vertical gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub width: f32,
    /// Height of the top barrier (the gap starts here)
    pub gap_top: f32,
    pub gap_size: f32,
    pub world_height: f32,
    /// Scroll speed captured at spawn
    pub speed: f32,
    pub passed: bool,
    /// Ticks processed by the field; zero until its first advance pass
    #[serde(default)]
    pub age_ticks: u32,
}

impl Obstacle {
    /// Spawn at the right edge with a gap drawn uniformly from the allowed range
    pub fn new(world_height: f32, width: f32, gap_size: f32, speed: f32, rng: &mut Pcg32) -> Self {
        let max_top = world_height as i32 - GAP_MARGIN - gap_size as i32;
        let gap_top = rng.random_range(GAP_MARGIN..=max_top.max(GAP_MARGIN));
        Self::with_gap(WORLD_WIDTH, gap_top as f32, world_height, width, gap_size, speed)
    }

    /// Build an obstacle with an explicit gap position
    pub fn with_gap(x: f32, gap_top: f32, world_height: f32, width: f32, gap_size: f32, speed: f32) -> Self {
        Self {
            x,
            width,
            gap_top,
            gap_size,
            world_height,
            speed,
            passed: false,
            age_ticks: 0,
        }
    }

    /// Scroll left by the captured speed
    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    /// Gap bottom edge (top of the lower barrier)
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_size
    }

    /// Top and bottom barrier rectangles
    pub fn solid_spans(&self) -> [Rect; 2] {
        let right = self.x + self.width;
        [
            Rect::new(Vec2::new(self.x, 0.0), Vec2::new(right, self.gap_top)),
            Rect::new(Vec2::new(self.x, self.gap_bottom()), Vec2::new(right, self.world_height)),
        ]
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < OFF_SCREEN_THRESHOLD
    }
}

/// RNG state wrapper: one PCG stream per run so restarts stay reproducible
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn for_run(seed: u64, run: u64) -> Self {
        Self { seed, stream: run }
    }

    pub fn to_rng(&self) -> Pcg32 {
        if self.stream == 0 {
            Pcg32::seed_from_u64(self.seed)
        } else {
            Pcg32::new(self.seed, self.stream)
        }
    }
}
