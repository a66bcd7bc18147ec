//! Difficulty profiles
//!
//! A profile is built once per attempt. Any randomness is drawn here from the
//! caller's RNG, so a seeded generator reproduces the whole run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError, ensure_finite, ensure_non_negative, ensure_positive};
use crate::per_tick_acceleration;

/// Built-in difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    Moon = 1,
    CurveballMoon = 2,
}

impl Preset {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Preset::Moon),
            2 => Some(Preset::CurveballMoon),
            _ => None,
        }
    }

    pub fn id(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Moon => "Moon",
            Preset::CurveballMoon => "Curveball Moon",
        }
    }
}

const MOON_HEAT_COEFFICIENT: f32 = 2.0;
const MOON_MAX_SAFE_VELOCITY: f32 = 2.0;
const MOON_STARTING_VELOCITY: f32 = 1.0;
/// Curveball spin range (degrees per tick, whole numbers)
const CURVEBALL_SPIN_RANGE: std::ops::RangeInclusive<i32> = -5..=5;
const CURVEBALL_VELOCITY_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Parameters governing one attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub preset_id: u32,
    pub name: String,
    /// Velocity gained per tick, already scaled to the tick rate
    pub gravity: f32,
    /// Combined |x_vel| + |y_vel| at or above which touchdown is a crash
    pub max_safe_velocity: f32,
    /// Heat per thruster burn; a tenth of it dissipates each tick
    pub heat_coefficient: f32,
    pub score_multiplier: f32,
    pub starting_velocity: f32,
    pub starting_angular_velocity: f32,
}

impl DifficultyProfile {
    /// The plain Moon preset at the reference tick rate
    pub fn moon() -> Self {
        Self {
            preset_id: Preset::Moon.id(),
            name: Preset::Moon.name().to_string(),
            gravity: LUNAR_GRAVITY,
            max_safe_velocity: MOON_MAX_SAFE_VELOCITY,
            heat_coefficient: MOON_HEAT_COEFFICIENT,
            score_multiplier: 1.0,
            starting_velocity: MOON_STARTING_VELOCITY,
            starting_angular_velocity: 0.0,
        }
    }

    /// Build a preset at the reference tick rate
    pub fn from_preset<R: Rng>(preset: Preset, rng: &mut R) -> Self {
        match preset {
            Preset::Moon => Self::moon(),
            Preset::CurveballMoon => {
                let spin = rng.random_range(CURVEBALL_SPIN_RANGE);
                let velocity = rng.random_range(CURVEBALL_VELOCITY_RANGE);
                log::debug!("Curveball rolled spin {} and velocity {:.3}", spin, velocity);
                Self {
                    preset_id: preset.id(),
                    name: preset.name().to_string(),
                    heat_coefficient: MOON_HEAT_COEFFICIENT * 2.0,
                    score_multiplier: 2.0,
                    starting_velocity: velocity,
                    starting_angular_velocity: spin as f32,
                    ..Self::moon()
                }
            }
        }
    }

    /// Copy of this profile with gravity rescaled for another tick rate
    pub fn for_tick_rate(&self, tick_rate_hz: f32) -> Self {
        Self {
            gravity: per_tick_acceleration(self.gravity, tick_rate_hz),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("gravity", self.gravity)?;
        ensure_positive("max_safe_velocity", self.max_safe_velocity)?;
        ensure_non_negative("heat_coefficient", self.heat_coefficient)?;
        ensure_non_negative("score_multiplier", self.score_multiplier)?;
        ensure_finite("starting_velocity", self.starting_velocity)?;
        ensure_finite("starting_angular_velocity", self.starting_angular_velocity)?;
        Ok(())
    }
}

/// Build the profile for a preset id at the reference tick rate
pub fn make_profile<R: Rng>(preset_id: u32, rng: &mut R) -> Result<DifficultyProfile> {
    let preset = Preset::from_id(preset_id).ok_or(SimError::UnknownPreset(preset_id))?;
    Ok(DifficultyProfile::from_preset(preset, rng))
}

/// Build the profile for a preset id with gravity scaled to `tick_rate_hz`
pub fn make_profile_for_rate<R: Rng>(
    preset_id: u32,
    tick_rate_hz: f32,
    rng: &mut R,
) -> Result<DifficultyProfile> {
    ensure_positive("tick_rate_hz", tick_rate_hz)?;
    Ok(make_profile(preset_id, rng)?.for_tick_rate(tick_rate_hz))
}
