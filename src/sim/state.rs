//! Lander state and attempt construction
//!
//! One `LanderState` per attempt. Start a new attempt by building a new state,
//! never by resetting an old one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::profile::DifficultyProfile;
use crate::consts::*;
use crate::error::{Result, ensure_finite};
use crate::normalize_degrees;
use crate::settings::{ControlScheme, LanderSpec};

/// Summary of where an attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandingOutcome {
    InFlight,
    Landed,
    Crashed,
}

/// The simulated craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanderState {
    pub x: f32,
    /// Screen convention: y grows toward the ground
    pub y: f32,
    pub x_vel: f32,
    pub y_vel: f32,
    /// Degrees in [0, 360); 270 is nose-down vertical
    pub angle: f32,
    /// Degrees per tick
    pub rotation_velocity: f32,
    pub fuel_remaining: f32,
    pub max_fuel: f32,
    pub heat: f32,
    pub max_heat: f32,
    pub mass: f32,
    pub thruster_strength: f32,
    pub hull_width: f32,
    pub hull_height: f32,
    /// Per-attempt copies of the profile constants the physics reads each tick
    pub gravity: f32,
    pub heat_coefficient: f32,
    pub max_safe_velocity: f32,
    pub control_scheme: ControlScheme,
    pub landed: bool,
    /// Only meaningful once `landed` is true
    pub crashed: bool,
    /// Combined |x_vel| + |y_vel| at the instant of touchdown
    pub touchdown_velocity: Option<f32>,
    /// Ticks integrated so far, frozen on landing
    pub flight_ticks: u64,
}

impl LanderState {
    /// Initialize a lander from a profile. All fields are set here; nothing
    /// is shared with previous attempts.
    pub fn new(
        difficulty: &DifficultyProfile,
        spec: &LanderSpec,
        control_scheme: ControlScheme,
        start: Vec2,
        start_angle: f32,
    ) -> Self {
        Self {
            x: start.x,
            y: start.y,
            x_vel: 0.0,
            y_vel: difficulty.starting_velocity,
            angle: normalize_degrees(start_angle),
            rotation_velocity: difficulty.starting_angular_velocity,
            fuel_remaining: spec.max_fuel,
            max_fuel: spec.max_fuel,
            heat: 0.0,
            max_heat: spec.max_heat,
            mass: spec.mass,
            thruster_strength: spec.thruster_strength,
            hull_width: spec.hull_width,
            hull_height: spec.hull_height,
            gravity: difficulty.gravity,
            heat_coefficient: difficulty.heat_coefficient,
            max_safe_velocity: difficulty.max_safe_velocity,
            control_scheme,
            landed: false,
            crashed: false,
            touchdown_velocity: None,
            flight_ticks: 0,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.x_vel, self.y_vel)
    }

    /// Velocity measure used by the crash test
    pub fn combined_velocity(&self) -> f32 {
        self.x_vel.abs() + self.y_vel.abs()
    }

    pub fn outcome(&self) -> LandingOutcome {
        match (self.landed, self.crashed) {
            (false, _) => LandingOutcome::InFlight,
            (true, false) => LandingOutcome::Landed,
            (true, true) => LandingOutcome::Crashed,
        }
    }

    /// Flight duration in seconds for a loop ticking at `tick_rate_hz`
    pub fn flight_time(&self, tick_rate_hz: f32) -> f32 {
        self.flight_ticks as f32 / tick_rate_hz
    }

    /// Whether a thruster burn would currently be accepted
    pub fn can_fire(&self) -> bool {
        !self.landed && self.fuel_remaining > 0.0 && self.heat < self.max_heat
    }

    /// Deviation of the nose from the descent attitude, in (-180, 180]
    pub fn tilt(&self) -> f32 {
        let delta = normalize_degrees(self.angle - DESCENT_ATTITUDE_DEG);
        if delta > 180.0 { delta - 360.0 } else { delta }
    }

    /// Half extents of the hull's axis-aligned box at the current angle
    pub fn half_extents(&self) -> Vec2 {
        let (sin, cos) = self.tilt().to_radians().sin_cos();
        let (w, h) = (self.hull_width, self.hull_height);
        Vec2::new(
            (w * cos).abs() + (h * sin).abs(),
            (w * sin).abs() + (h * cos).abs(),
        ) * 0.5
    }
}

/// Start a new attempt.
///
/// Validates the profile first so bad numbers fail here instead of turning
/// into NaN positions a few ticks later.
pub fn new_attempt(
    difficulty: &DifficultyProfile,
    spec: &LanderSpec,
    control_scheme: ControlScheme,
    start: Vec2,
    start_angle: f32,
) -> Result<LanderState> {
    difficulty.validate()?;
    spec.validate()?;
    ensure_finite("start.x", start.x)?;
    ensure_finite("start.y", start.y)?;
    ensure_finite("start_angle", start_angle)?;

    log::debug!(
        "New attempt on {} at ({:.1}, {:.1}), angle {:.1}",
        difficulty.name,
        start.x,
        start.y,
        start_angle
    );
    Ok(LanderState::new(difficulty, spec, control_scheme, start, start_angle))
}
