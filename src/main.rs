//! Lunar Descent demo driver
//!
//! Flies one autopiloted attempt through the fixed-timestep loop and prints
//! the outcome. Usage: `lunar-descent [preset_id] [seed]`

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use lunar_descent::consts::*;
use lunar_descent::sim::{Command, FixedTimestep, LanderState, LandingOutcome, make_profile_for_rate, step};
use lunar_descent::{HighScoreTable, Result, ScoreRecord, SimConfig};

/// Frame time of the pretend renderer driving the loop
const FRAME_DT: f32 = 1.0 / 50.0;
/// Give up after ten simulated minutes
const MAX_FLIGHT_SECS: f32 = 600.0;
/// Descent rate the autopilot holds
const TARGET_DESCENT: f32 = 0.6;

/// Proportional autopilot: level the nose, then hold a gentle descent rate
fn autopilot(state: &LanderState) -> Vec<Command> {
    let mut commands = Vec::new();
    let tilt = state.tilt();
    let wanted_spin = (-tilt * 0.1).clamp(-2.0, 2.0);
    if state.rotation_velocity > wanted_spin + PITCH_FORCE {
        commands.push(Command::pitch_right());
    } else if state.rotation_velocity < wanted_spin - PITCH_FORCE {
        commands.push(Command::pitch_left());
    }
    if tilt.abs() < 30.0 && state.y_vel > TARGET_DESCENT {
        commands.push(Command::MainThruster);
    }
    commands
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let preset_id = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    let seed = args.next().and_then(|a| a.parse().ok()).unwrap_or(12345u64);

    let config = SimConfig::default();
    let mut rng = Pcg32::seed_from_u64(seed);
    let difficulty = make_profile_for_rate(preset_id, config.tick_rate_hz, &mut rng)?;
    log::info!("Flying {} (seed {})", difficulty.name, seed);

    let start = Vec2::new(config.viewport.width / 2.0, config.viewport.height / 4.0);
    let mut lander = config.new_attempt(&difficulty, start, DESCENT_ATTITUDE_DEG)?;
    let mut clock = FixedTimestep::new(config.tick_rate_hz);

    while !lander.landed && lander.flight_time(config.tick_rate_hz) < MAX_FLIGHT_SECS {
        for _ in 0..clock.advance(FRAME_DT) {
            let commands = autopilot(&lander);
            step(&mut lander, &commands, config.viewport);
        }
    }

    let flight_time = lander.flight_time(config.tick_rate_hz);
    match lander.outcome() {
        LandingOutcome::InFlight => {
            println!("Still airborne after {:.1}s, giving up", flight_time);
            return Ok(());
        }
        LandingOutcome::Crashed => println!("CRASHED after {:.2}s", flight_time),
        LandingOutcome::Landed => println!("Successful landing after {:.2}s", flight_time),
    }

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    let record = ScoreRecord::finalize(
        "Autopilot",
        config.game_version.clone(),
        &lander,
        flight_time,
        &difficulty,
        config.scoring_rules,
        timestamp,
    )?;
    println!("Remaining fuel: {:.2}", record.fuel_remaining);
    println!("Score: {}", record.score);
    for achievement in &record.achievements {
        println!("  * {}", achievement);
    }

    let mut table = HighScoreTable::new();
    if table.qualifies(record.score) {
        table.insert(record);
    }
    println!("{}", table.to_json()?);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Lunar Descent (headless) starting...");

    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
