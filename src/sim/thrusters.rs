//! Thruster control
//!
//! Every burn is gated the same way: it needs fuel left and heat below the
//! ceiling. A burn that fails the gate does nothing. Running hot therefore
//! locks the controls until passive cooling brings heat back under the cap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::LanderState;
use crate::consts::PITCH_FORCE;
use crate::settings::ControlScheme;

/// Translational thruster directions for the classic control scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    /// Against gravity
    Up,
    Down,
}

/// A single control command for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Main engine along the nose
    MainThruster,
    /// Signed rotational impulse (degrees per tick)
    AttitudeThruster(f32),
    /// Classic scheme only
    Translate(Direction),
}

impl Command {
    pub fn pitch_left() -> Self {
        Command::AttitudeThruster(PITCH_FORCE)
    }

    pub fn pitch_right() -> Self {
        Command::AttitudeThruster(-PITCH_FORCE)
    }

    /// Whether the command exists on a lander with this control scheme
    pub fn supported_by(&self, scheme: ControlScheme) -> bool {
        match self {
            Command::MainThruster | Command::AttitudeThruster(_) => {
                scheme == ControlScheme::Attitude
            }
            Command::Translate(_) => scheme == ControlScheme::Classic,
        }
    }
}

impl LanderState {
    /// Gate and pay for one burn. Returns false (and changes nothing) when
    /// the lander is down, dry or overheated.
    fn burn(&mut self) -> bool {
        if self.landed {
            return false;
        }
        if self.fuel_remaining <= 0.0 {
            log::debug!("Burn rejected: out of fuel");
            return false;
        }
        if self.heat >= self.max_heat {
            log::debug!("Burn rejected: overheated ({:.1}/{:.1})", self.heat, self.max_heat);
            return false;
        }
        self.fuel_remaining = (self.fuel_remaining - self.thruster_strength).max(0.0);
        self.heat = (self.heat + self.heat_coefficient).min(self.max_heat);
        true
    }

    /// Fire the main engine along the current angle
    pub fn fire_main_thruster(&mut self) -> bool {
        if !self.burn() {
            return false;
        }
        let force = Vec2::from_angle(self.angle.to_radians()) * self.thruster_strength;
        // y grows downward on screen, so the vertical component flips sign
        self.x_vel -= force.x / self.mass;
        self.y_vel += force.y / self.mass;
        true
    }

    /// Fire the attitude thrusters with a signed rotational impulse
    pub fn fire_attitude_thruster(&mut self, signed_force: f32) -> bool {
        if !signed_force.is_finite() || !self.burn() {
            return false;
        }
        self.rotation_velocity += signed_force;
        true
    }

    /// Fire one of the classic translational thrusters
    pub fn fire_translation_thruster(&mut self, direction: Direction) -> bool {
        if !self.burn() {
            return false;
        }
        let dv = self.thruster_strength / self.mass;
        match direction {
            Direction::Left => self.x_vel -= dv,
            Direction::Right => self.x_vel += dv,
            Direction::Up => self.y_vel -= dv,
            Direction::Down => self.y_vel += dv,
        }
        true
    }

    /// Apply a single command, returning whether it was accepted
    pub fn apply(&mut self, command: Command) -> bool {
        if !command.supported_by(self.control_scheme) {
            return false;
        }
        match command {
            Command::MainThruster => self.fire_main_thruster(),
            Command::AttitudeThruster(force) => self.fire_attitude_thruster(force),
            Command::Translate(direction) => self.fire_translation_thruster(direction),
        }
    }
}

/// Apply this tick's commands in order; returns how many were accepted
pub fn apply_commands(state: &mut LanderState, commands: &[Command]) -> usize {
    commands.iter().filter(|&&c| state.apply(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DESCENT_ATTITUDE_DEG;
    use crate::settings::LanderSpec;
    use crate::sim::profile::DifficultyProfile;

    fn lander(scheme: ControlScheme) -> LanderState {
        LanderState::new(
            &DifficultyProfile::moon(),
            &LanderSpec::default(),
            scheme,
            Vec2::new(100.0, 100.0),
            DESCENT_ATTITUDE_DEG,
        )
    }

    #[test]
    fn test_main_thruster_slows_descent() {
        let mut l = lander(ControlScheme::Attitude);
        let before = l.y_vel;
        assert!(l.fire_main_thruster());
        assert!((l.y_vel - (before - 0.25)).abs() < 1e-6);
        assert!(l.x_vel.abs() < 1e-6);
        assert_eq!(l.fuel_remaining, l.max_fuel - l.thruster_strength);
        assert_eq!(l.heat, l.heat_coefficient);
    }

    #[test]
    fn test_main_thruster_direction_follows_angle() {
        let mut l = lander(ControlScheme::Attitude);
        l.angle = 0.0;
        assert!(l.fire_main_thruster());
        // Nose at 0 degrees pushes toward negative x
        assert!((l.x_vel + 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_attitude_thruster() {
        let mut l = lander(ControlScheme::Attitude);
        assert!(l.apply(Command::pitch_left()));
        assert_eq!(l.rotation_velocity, 0.25);
        assert!(l.apply(Command::pitch_right()));
        assert!(l.apply(Command::pitch_right()));
        assert_eq!(l.rotation_velocity, -0.25);
        assert_eq!(l.heat, l.heat_coefficient * 3.0);
        assert!(!l.fire_attitude_thruster(f32::NAN));
    }

    #[test]
    fn test_overheat_lockout() {
        let mut l = lander(ControlScheme::Attitude);
        l.heat = l.max_heat;
        let snapshot = l.clone();
        assert!(!l.fire_main_thruster());
        assert!(!l.fire_attitude_thruster(1.0));
        assert_eq!(l, snapshot);

        l.heat = l.max_heat - 0.5;
        assert!(l.fire_main_thruster());
        assert_eq!(l.heat, l.max_heat);
    }

    #[test]
    fn test_fuel_never_negative() {
        let mut l = lander(ControlScheme::Attitude);
        l.fuel_remaining = 0.1;
        assert!(l.fire_main_thruster());
        assert_eq!(l.fuel_remaining, 0.0);
        assert!(!l.fire_main_thruster());
    }

    #[test]
    fn test_landed_rejects_commands() {
        let mut l = lander(ControlScheme::Attitude);
        l.landed = true;
        let snapshot = l.clone();
        let accepted = apply_commands(
            &mut l,
            &[Command::MainThruster, Command::AttitudeThruster(1.0)],
        );
        assert_eq!(accepted, 0);
        assert_eq!(l, snapshot);
    }

    #[test]
    fn test_scheme_gating() {
        let mut classic = lander(ControlScheme::Classic);
        assert!(!classic.apply(Command::MainThruster));
        assert!(!classic.apply(Command::pitch_left()));
        assert!(classic.apply(Command::Translate(Direction::Left)));
        assert!(classic.apply(Command::Translate(Direction::Up)));
        assert_eq!(classic.x_vel, -0.25);
        assert_eq!(classic.y_vel, 0.75);

        let mut modern = lander(ControlScheme::Attitude);
        assert!(!modern.apply(Command::Translate(Direction::Right)));
        assert_eq!(modern.fuel_remaining, modern.max_fuel);
    }

    #[test]
    fn test_apply_commands_counts_accepted() {
        let mut l = lander(ControlScheme::Attitude);
        l.fuel_remaining = 0.25;
        let accepted = apply_commands(&mut l, &[Command::MainThruster, Command::pitch_left()]);
        assert_eq!(accepted, 1);
        assert_eq!(l.rotation_velocity, 0.0);
    }
}
