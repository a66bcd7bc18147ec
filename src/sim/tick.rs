//! Fixed timestep flight integration
//!
//! Advances a lander by exactly one tick. Gravity is a per-tick constant on the
//! lander, so nothing here depends on frame timing.

use super::state::LanderState;
use super::thrusters::{Command, apply_commands};
use crate::consts::*;
use crate::normalize_degrees;
use crate::settings::Viewport;

/// Whether `angle` (degrees) is inside the touchdown attitude window
#[inline]
pub fn attitude_within_tolerance(angle: f32) -> bool {
    let low = DESCENT_ATTITUDE_DEG - ATTITUDE_TOLERANCE_DEG;
    let high = DESCENT_ATTITUDE_DEG + ATTITUDE_TOLERANCE_DEG;
    (low..=high).contains(&angle)
}

/// Crash test at touchdown: too fast or too tilted, either is enough
#[inline]
pub fn is_crash(combined_velocity: f32, angle: f32, max_safe_velocity: f32) -> bool {
    combined_velocity >= max_safe_velocity || !attitude_within_tolerance(angle)
}

/// Advance the lander by one fixed tick
pub fn advance_tick(state: &mut LanderState, viewport: Viewport) {
    if state.landed {
        return;
    }

    state.flight_ticks += 1;
    state.angle = normalize_degrees(state.angle + state.rotation_velocity);

    let half = state.half_extents();

    if state.y >= viewport.height - half.y {
        resolve_landing(state);
        return;
    }

    // Horizontal wrap: leaving one side re-enters from the other
    let x_min = -half.x;
    let x_max = viewport.width + half.x;
    if state.x < x_min {
        state.x = x_max - 1.0;
    } else if state.x > x_max {
        state.x = x_min + 1.0;
    }

    state.heat = (state.heat - state.heat_coefficient / 10.0).max(0.0);

    state.y_vel += state.gravity;

    state.y += state.y_vel;
    state.x += state.x_vel;
}

/// Apply this tick's commands, then integrate. Returns the accepted count.
pub fn step(state: &mut LanderState, commands: &[Command], viewport: Viewport) -> usize {
    let accepted = apply_commands(state, commands);
    advance_tick(state, viewport);
    accepted
}

/// Terminal touchdown evaluation; runs once per attempt
fn resolve_landing(state: &mut LanderState) {
    let combined = state.combined_velocity();
    state.landed = true;
    state.rotation_velocity = 0.0;
    state.touchdown_velocity = Some(combined);
    state.crashed = is_crash(combined, state.angle, state.max_safe_velocity);

    if state.control_scheme.zeroes_velocity_on_landing() {
        state.x_vel = 0.0;
        state.y_vel = 0.0;
    }

    if state.crashed {
        log::info!(
            "Crashed at x={:.1}: velocity {:.3} (limit {:.3}), angle {:.1}",
            state.x,
            combined,
            state.max_safe_velocity,
            state.angle
        );
    } else {
        log::info!(
            "Landed at x={:.1} after {} ticks: velocity {:.3}, angle {:.1}",
            state.x,
            state.flight_ticks,
            combined,
            state.angle
        );
    }
}
