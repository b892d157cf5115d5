//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (physics constants are per tick)
//! - Seeded RNG only
//! - Stable iteration order (spawn order = screen order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod field;
pub mod machine;
pub mod rect;
pub mod scene;
pub mod session;
pub mod state;

pub use clock::Stepper;
pub use collision::{is_terminal, obstacle_collision, world_bounds_violation};
pub use field::ObstacleField;
pub use machine::{Flow, GameStateMachine, InputEvent, Screen};
pub use rect::Rect;
pub use scene::{EntityView, GamePhase, Scene};
pub use session::{GameSession, TickInput, TickOutcome};
pub use state::{Entity, Obstacle, RngState};
