//! Simulation settings
//!
//! Serialized as JSON by whoever owns storage. Every section defaults, so a
//! document only needs the fields it overrides.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, ensure_positive};
use crate::scoring::ScoringRules;
use crate::sim::{DifficultyProfile, LanderState, new_attempt};

/// Which set of thrusters the lander carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    /// Four translational thrusters, no orientation control
    Classic,
    /// Main engine along the nose plus attitude (RCS) thrusters
    #[default]
    Attitude,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Classic => "Classic",
            ControlScheme::Attitude => "Attitude",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(ControlScheme::Classic),
            "attitude" | "rcs" => Some(ControlScheme::Attitude),
            _ => None,
        }
    }

    /// Whether touchdown zeroes the lander's velocity
    pub fn zeroes_velocity_on_landing(&self) -> bool {
        matches!(self, ControlScheme::Classic)
    }
}

/// Playfield size in simulation units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

/// Physical constants of the craft itself
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderSpec {
    pub max_fuel: f32,
    pub max_heat: f32,
    pub mass: f32,
    /// Fuel burned and force produced per thruster activation
    pub thruster_strength: f32,
    /// Hull extent at the descent attitude, used for wrap and ground bounds
    pub hull_width: f32,
    pub hull_height: f32,
}

impl Default for LanderSpec {
    fn default() -> Self {
        Self {
            max_fuel: DEFAULT_MAX_FUEL,
            max_heat: DEFAULT_MAX_HEAT,
            mass: DEFAULT_MASS,
            thruster_strength: DEFAULT_THRUSTER_STRENGTH,
            hull_width: DEFAULT_HULL_WIDTH,
            hull_height: DEFAULT_HULL_HEIGHT,
        }
    }
}

impl LanderSpec {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("max_fuel", self.max_fuel)?;
        ensure_positive("max_heat", self.max_heat)?;
        ensure_positive("mass", self.mass)?;
        ensure_positive("thruster_strength", self.thruster_strength)?;
        ensure_positive("hull_width", self.hull_width)?;
        ensure_positive("hull_height", self.hull_height)?;
        Ok(())
    }
}

/// Top-level simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed ticks per second driven by the caller's loop
    pub tick_rate_hz: f32,
    pub viewport: Viewport,
    pub lander: LanderSpec,
    pub control_scheme: ControlScheme,
    pub scoring_rules: ScoringRules,
    /// Stamped onto every finalized score record
    pub game_version: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: REFERENCE_TICK_RATE,
            viewport: Viewport::default(),
            lander: LanderSpec::default(),
            control_scheme: ControlScheme::default(),
            scoring_rules: ScoringRules::default(),
            game_version: GAME_VERSION.to_string(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded settings: {} Hz, {}x{} viewport, {} controls",
            config.tick_rate_hz,
            config.viewport.width,
            config.viewport.height,
            config.control_scheme.as_str()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("tick_rate_hz", self.tick_rate_hz)?;
        ensure_positive("viewport.width", self.viewport.width)?;
        ensure_positive("viewport.height", self.viewport.height)?;
        self.lander.validate()
    }

    /// Start an attempt with this config's lander and control scheme
    pub fn new_attempt(
        &self,
        difficulty: &DifficultyProfile,
        start: Vec2,
        start_angle: f32,
    ) -> Result<LanderState> {
        self.validate()?;
        new_attempt(difficulty, &self.lander, self.control_scheme, start, start_angle)
    }
}
