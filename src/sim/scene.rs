//! Frame-local snapshot handed to the renderer
//!
//! Plain values only; the renderer never touches simulation state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for Start
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, final score on screen
    GameOver,
}

/// Entity as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub pos: Vec2,
    pub radius: f32,
    pub vel: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub phase: GamePhase,
    pub world_size: Vec2,
    /// Present only while playing
    pub entity: Option<EntityView>,
    /// Barrier rectangles, left to right (two per obstacle)
    pub obstacles: Vec<Rect>,
    pub score: u32,
    pub speed: u32,
    /// Present only on the game over screen
    pub final_score: Option<u32>,
    pub best_score: Option<u32>,
}
