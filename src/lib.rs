//! Flappy Core - A single-screen flappy arcade game simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `highscores`: In-memory leaderboard for the current process
//! - `settings`: Host/demo settings (never physics)

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
///
/// Physics values are tuned per tick; the step rate is fixed so there is no dt scaling.
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 400.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Entity defaults
    pub const ENTITY_X: f32 = 100.0;
    pub const ENTITY_RADIUS: f32 = 15.0;
    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.25;
    /// Upward impulse; replaces the current velocity
    pub const JUMP_IMPULSE: f32 = -5.0;

    /// Obstacle defaults
    pub const BARRIER_WIDTH: f32 = 50.0;
    pub const GAP_SIZE: f32 = 150.0;
    /// Minimum distance between the gap and either world edge
    pub const GAP_MARGIN: i32 = 100;
    /// Obstacles are removed once `x + width` drops below this
    pub const OFF_SCREEN_THRESHOLD: f32 = -10.0;

    /// Spawn interval in milliseconds and in ticks (1500 ms at 60 Hz)
    pub const SPAWN_INTERVAL_MS: u64 = 1500;
    pub const SPAWN_INTERVAL_TICKS: u64 = SPAWN_INTERVAL_MS * TICK_RATE as u64 / 1000;

    /// Scroll speed ramp
    pub const INITIAL_SPEED: u32 = 3;
    pub const POINTS_PER_SPEED_STEP: u32 = 5;
}
