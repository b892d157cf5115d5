//! Host settings for the demo runner
//!
//! Physics is fixed in `crate::consts`; nothing here changes how the game plays.
//! Loaded from a JSON file, falling back to defaults on any problem.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "FLAPPY_SETTINGS";

/// Demo runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (time-derived when absent)
    pub seed: Option<u64>,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Runs to play before quitting
    pub runs: u32,
    /// Tick budget per run; a run still alive at the limit is abandoned
    pub max_ticks_per_run: u64,
    /// Pace the loop against the wall clock instead of running flat out
    pub realtime: bool,
    /// Print the final scene as JSON on exit
    pub print_scene: bool,
    /// Leaderboard size
    pub high_score_slots: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            autopilot: true,
            runs: 3,
            // Two minutes of play at 60 Hz
            max_ticks_per_run: 2 * 60 * 60,
            realtime: false,
            print_scene: false,
            high_score_slots: crate::highscores::MAX_HIGH_SCORES,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, using defaults if it is missing or malformed
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from an explicit path, then `FLAPPY_SETTINGS`, then defaults
    pub fn load(path: Option<&str>) -> Self {
        let from_env = std::env::var(SETTINGS_ENV).ok();
        match path.or(from_env.as_deref()) {
            Some(path) => Self::load_from(Path::new(path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
