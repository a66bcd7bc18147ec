//! Lunar Descent - deterministic lander simulation core
//!
//! Core modules:
//! - `sim`: Fixed-timestep flight physics, thrusters and landing resolution
//! - `scoring`: Versioned score rules and finalized score records
//! - `highscores`: Capped, ordered top-10 table
//! - `settings`: Data-driven simulation configuration
//!
//! Rendering, input mapping, audio and storage are the caller's business.

pub mod error;
pub mod highscores;
pub mod scoring;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use highscores::HighScoreTable;
pub use scoring::{Achievement, ScoreOutcome, ScoreRecord, ScoringRules, compute_score};
pub use settings::{ControlScheme, LanderSpec, SimConfig, Viewport};

/// Game configuration constants
pub mod consts {
    /// Tick rate every per-tick constant below is expressed at
    pub const REFERENCE_TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep at the reference rate
    pub const SIM_DT: f32 = 1.0 / REFERENCE_TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Lunar gravity, velocity gained per tick at the reference rate
    pub const LUNAR_GRAVITY: f32 = 0.0253;

    /// Nose-down vertical descent attitude (degrees)
    pub const DESCENT_ATTITUDE_DEG: f32 = 270.0;
    /// Allowed deviation either side of the descent attitude at touchdown
    pub const ATTITUDE_TOLERANCE_DEG: f32 = 10.0;
    /// Rotational impulse of one "pitch" control
    pub const PITCH_FORCE: f32 = 0.25;

    /// Lander defaults
    pub const DEFAULT_MAX_FUEL: f32 = 100.0;
    pub const DEFAULT_MAX_HEAT: f32 = 100.0;
    pub const DEFAULT_MASS: f32 = 1.0;
    pub const DEFAULT_THRUSTER_STRENGTH: f32 = 0.25;
    pub const DEFAULT_HULL_WIDTH: f32 = 40.0;
    pub const DEFAULT_HULL_HEIGHT: f32 = 50.0;

    /// Default viewport
    pub const VIEWPORT_WIDTH: f32 = 720.0;
    pub const VIEWPORT_HEIGHT: f32 = 720.0;

    /// Version stamped on score records
    pub const GAME_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rescale a per-tick acceleration given at [`consts::REFERENCE_TICK_RATE`]
/// to another fixed tick rate.
///
/// Velocity is measured per tick, so a faster tick needs a quadratically
/// smaller per-tick increment to cover the same distance per second.
#[inline]
pub fn per_tick_acceleration(accel_at_reference: f32, tick_rate_hz: f32) -> f32 {
    let ratio = consts::REFERENCE_TICK_RATE / tick_rate_hz;
    accel_at_reference * ratio * ratio
}
