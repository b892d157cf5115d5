//! Fixed timestep accumulator
//!
//! Turns variable frame times into a whole number of simulation ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct Stepper {
    accumulator: f32,
    /// Ticks handed out so far
    pub total_ticks: u64,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add elapsed seconds and return how many ticks to run now.
    ///
    /// Capped at `MAX_SUBSTEPS`; time beyond the cap is dropped.
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
            self.accumulator += elapsed_secs;
        }

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Frame overran, dropping {:.3}s", self.accumulator);
            self.accumulator = 0.0;
        }

        self.total_ticks += ticks as u64;
        ticks
    }
}
