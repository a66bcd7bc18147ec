//! Deterministic simulation module
//!
//! All flight logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, injected by the caller
//! - One owned `LanderState` per attempt
//! - No rendering or platform dependencies

pub mod clock;
pub mod profile;
pub mod state;
pub mod thrusters;
pub mod tick;

pub use clock::FixedTimestep;
pub use profile::{DifficultyProfile, Preset, make_profile, make_profile_for_rate};
pub use state::{LanderState, LandingOutcome, new_attempt};
pub use thrusters::{Command, Direction, apply_commands};
pub use tick::{advance_tick, attitude_within_tolerance, is_crash, step};
