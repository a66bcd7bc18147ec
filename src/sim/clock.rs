//! Fixed timestep accumulator
//!
//! Turns variable frame deltas into a whole number of fixed simulation ticks.
//! Physics only ever sees whole ticks, so a slow renderer changes how many
//! ticks run per frame, never what one tick does.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Seconds per tick
    step: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(tick_rate_hz: f32) -> Self {
        Self {
            step: 1.0 / tick_rate_hz,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    /// Feed one frame's elapsed time; returns how many ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.step {
            // Too far behind: drop the backlog instead of spiralling
            log::warn!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= self.step;
        }
        ticks
    }

    /// Fraction of a tick left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}
