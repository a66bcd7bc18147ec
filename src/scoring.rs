//! Landing score computation
//!
//! Scoring has changed between releases, so the rules are a versioned
//! strategy. Every revision is a pure function of the landed state, the flight
//! time and the difficulty profile.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::sim::{DifficultyProfile, LanderState};

/// Named bonuses awarded on a successful landing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    /// Touched down with an empty tank
    #[serde(rename = "Nothing but fumes")]
    NothingButFumes,
    /// 90% or more of the tank left
    #[serde(rename = "Fuel efficient")]
    FuelEfficient,
    #[serde(rename = "No time for chit-chat")]
    NoTimeForChitChat,
    #[serde(rename = "Nice")]
    Nice,
    /// Two minutes or more in the air
    #[serde(rename = "Dilly-dallying")]
    DillyDallying,
    /// 95% of the heat ceiling or more
    #[serde(rename = "Coming in hot")]
    ComingInHot,
    /// 2.5% of the heat ceiling or less
    #[serde(rename = "Cool as a cucumber")]
    CoolAsACucumber,
}

impl Achievement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Achievement::NothingButFumes => "Nothing but fumes",
            Achievement::FuelEfficient => "Fuel efficient",
            Achievement::NoTimeForChitChat => "No time for chit-chat",
            Achievement::Nice => "Nice",
            Achievement::DillyDallying => "Dilly-dallying",
            Achievement::ComingInHot => "Coming in hot",
            Achievement::CoolAsACucumber => "Cool as a cucumber",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score and the achievements that contributed to it, in award order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub score: u64,
    pub achievements: Vec<Achievement>,
}

impl ScoreOutcome {
    fn award(&mut self, points: u64, achievement: Achievement) {
        self.score += points;
        self.achievements.push(achievement);
    }
}

/// Scoring rule revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScoringRules {
    /// First release: empty-tank and quick-flight bonuses plus fuel per second
    Legacy,
    /// Fuel, flight-time and heat tiers plus doubled fuel efficiency
    #[default]
    Current,
}

impl ScoringRules {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringRules::Legacy => "Legacy",
            ScoringRules::Current => "Current",
        }
    }

    /// Score a landed lander.
    ///
    /// Fails with `InvalidInput` if the lander is still flying or
    /// `flight_time` is not a positive finite number of seconds.
    pub fn compute(
        &self,
        state: &LanderState,
        flight_time: f32,
        difficulty: &DifficultyProfile,
    ) -> Result<ScoreOutcome> {
        if !state.landed {
            return Err(SimError::InvalidInput(
                "cannot score a lander that has not touched down".to_string(),
            ));
        }
        if !flight_time.is_finite() || flight_time <= 0.0 {
            return Err(SimError::InvalidInput(format!(
                "flight time must be positive, got {}",
                flight_time
            )));
        }
        difficulty.validate()?;

        if state.crashed {
            return Ok(ScoreOutcome::default());
        }

        let outcome = match self {
            ScoringRules::Legacy => legacy(state, flight_time as f64, difficulty),
            ScoringRules::Current => current(state, flight_time as f64, difficulty),
        };
        log::debug!(
            "{} rules scored {} ({} achievements)",
            self.as_str(),
            outcome.score,
            outcome.achievements.len()
        );
        Ok(outcome)
    }
}

fn legacy(state: &LanderState, flight_time: f64, difficulty: &DifficultyProfile) -> ScoreOutcome {
    let fuel = state.fuel_remaining as f64;
    let mut out = ScoreOutcome::default();

    if fuel == 0.0 {
        out.award(1000, Achievement::NothingButFumes);
    }

    if flight_time <= 30.0 {
        out.award(600, Achievement::NoTimeForChitChat);
    } else if flight_time.floor() == 69.0 {
        out.award(69, Achievement::Nice);
    }

    out.score += (fuel / flight_time * 100.0).floor() as u64;
    out.score = apply_multiplier(out.score, difficulty.score_multiplier);
    out
}

fn current(state: &LanderState, flight_time: f64, difficulty: &DifficultyProfile) -> ScoreOutcome {
    let fuel = state.fuel_remaining as f64;
    let max_fuel = state.max_fuel as f64;
    let heat = state.heat as f64;
    let max_heat = state.max_heat as f64;
    let mut out = ScoreOutcome::default();

    if fuel == 0.0 {
        out.award(1000, Achievement::NothingButFumes);
    } else if fuel >= max_fuel * 9.0 / 10.0 {
        out.award(600, Achievement::FuelEfficient);
    }

    if flight_time <= 15.0 {
        out.award(600, Achievement::NoTimeForChitChat);
    } else if flight_time.floor() == 69.0 {
        out.award(69, Achievement::Nice);
    } else if flight_time >= 120.0 {
        out.award(100, Achievement::DillyDallying);
    }

    if heat >= max_heat * 95.0 / 100.0 {
        out.award(600, Achievement::ComingInHot);
    } else if heat <= max_heat * 25.0 / 1000.0 {
        out.award(1000, Achievement::CoolAsACucumber);
    }

    out.score += (fuel * 2.0 / flight_time * 100.0).floor() as u64;
    out.score = apply_multiplier(out.score, difficulty.score_multiplier);
    out
}

#[inline]
fn apply_multiplier(score: u64, multiplier: f32) -> u64 {
    (score as f64 * multiplier as f64).floor() as u64
}

/// Score a landing with the current rules
pub fn compute_score(
    state: &LanderState,
    flight_time: f32,
    difficulty: &DifficultyProfile,
) -> Result<ScoreOutcome> {
    ScoringRules::Current.compute(state, flight_time, difficulty)
}

/// A finalized, immutable high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_name: String,
    pub game_version: String,
    pub flight_time: f32,
    pub fuel_remaining: f32,
    pub heat: f32,
    pub crashed: bool,
    pub difficulty: DifficultyProfile,
    pub score: u64,
    pub achievements: Vec<Achievement>,
    /// Caller-supplied Unix timestamp (seconds)
    pub timestamp: f64,
    #[serde(default)]
    pub rules: ScoringRules,
}

impl ScoreRecord {
    /// Score a landed attempt and freeze the result into a record
    pub fn finalize(
        player_name: impl Into<String>,
        game_version: impl Into<String>,
        state: &LanderState,
        flight_time: f32,
        difficulty: &DifficultyProfile,
        rules: ScoringRules,
        timestamp: f64,
    ) -> Result<Self> {
        let outcome = rules.compute(state, flight_time, difficulty)?;
        Ok(Self {
            player_name: player_name.into(),
            game_version: game_version.into(),
            flight_time,
            fuel_remaining: state.fuel_remaining,
            heat: state.heat,
            crashed: state.crashed,
            difficulty: difficulty.clone(),
            score: outcome.score,
            achievements: outcome.achievements,
            timestamp,
            rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DESCENT_ATTITUDE_DEG;
    use crate::settings::{ControlScheme, LanderSpec};
    use glam::Vec2;
    use proptest::prelude::*;

    /// A landed, uncrashed lander with a 200 unit tank and 100 heat ceiling
    fn landed(fuel: f32, heat: f32) -> LanderState {
        let spec = LanderSpec {
            max_fuel: 200.0,
            ..LanderSpec::default()
        };
        let mut state = LanderState::new(
            &DifficultyProfile::moon(),
            &spec,
            ControlScheme::Attitude,
            Vec2::ZERO,
            DESCENT_ATTITUDE_DEG,
        );
        state.landed = true;
        state.fuel_remaining = fuel;
        state.heat = heat;
        state
    }

    fn multiplier(m: f32) -> DifficultyProfile {
        DifficultyProfile {
            score_multiplier: m,
            ..DifficultyProfile::moon()
        }
    }

    #[test]
    fn test_empty_tank_quick_flight() {
        // Mid-range heat keeps the heat tiers out of the total
        let out = compute_score(&landed(0.0, 50.0), 10.0, &multiplier(1.0)).unwrap();
        assert_eq!(
            out.achievements,
            vec![Achievement::NothingButFumes, Achievement::NoTimeForChitChat]
        );
        assert_eq!(out.score, 1600);
    }

    #[test]
    fn test_empty_tank_quick_flight_cold_engine() {
        let out = compute_score(&landed(0.0, 0.0), 10.0, &multiplier(1.0)).unwrap();
        assert_eq!(
            out.achievements,
            vec![
                Achievement::NothingButFumes,
                Achievement::NoTimeForChitChat,
                Achievement::CoolAsACucumber
            ]
        );
        assert_eq!(out.score, 2600);
    }

    #[test]
    fn test_slow_hot_landing_doubled() {
        let out = compute_score(&landed(100.0, 100.0), 150.0, &multiplier(2.0)).unwrap();
        assert_eq!(
            out.achievements,
            vec![Achievement::DillyDallying, Achievement::ComingInHot]
        );
        // (100 + 600 + floor(100 * 2 / 150 * 100)) * 2
        assert_eq!(out.score, 1666);
    }

    #[test]
    fn test_fuel_efficient_and_nice() {
        let out = compute_score(&landed(180.0, 50.0), 69.9, &multiplier(1.0)).unwrap();
        assert_eq!(out.achievements, vec![Achievement::FuelEfficient, Achievement::Nice]);
        // 600 + 69 + floor(360 / 69.9 * 100)
        assert_eq!(out.score, 600 + 69 + 515);
    }

    #[test]
    fn test_tier_boundaries() {
        use Achievement::*;
        // (flight_time, heat, expected achievements); 50 of 200 fuel earns no fuel tier
        let cases: [(f32, f32, &[Achievement]); 8] = [
            (15.0, 50.0, &[NoTimeForChitChat]),
            (15.01, 50.0, &[]),
            (120.0, 50.0, &[DillyDallying]),
            (119.99, 50.0, &[]),
            (60.0, 95.0, &[ComingInHot]),
            (60.0, 94.99, &[]),
            (60.0, 2.5, &[CoolAsACucumber]),
            (60.0, 2.51, &[]),
        ];
        for (flight_time, heat, expected) in cases {
            let out = compute_score(&landed(50.0, heat), flight_time, &multiplier(1.0)).unwrap();
            assert_eq!(
                out.achievements, expected,
                "flight_time={} heat={}",
                flight_time, heat
            );
        }

        let at = |t: f32, heat: f32| {
            compute_score(&landed(50.0, heat), t, &multiplier(1.0))
                .unwrap()
                .score
        };
        assert_eq!(at(15.0, 50.0), 600 + 666);
        assert_eq!(at(120.0, 50.0), 100 + 83);
        assert_eq!(at(60.0, 95.0), 600 + 166);
        assert_eq!(at(60.0, 2.5), 1000 + 166);
    }

    #[test]
    fn test_crashed_scores_nothing() {
        let mut state = landed(0.0, 0.0);
        state.crashed = true;
        for rules in [ScoringRules::Legacy, ScoringRules::Current] {
            let out = rules.compute(&state, 5.0, &multiplier(2.0)).unwrap();
            assert_eq!(out.score, 0);
            assert!(out.achievements.is_empty());
        }
    }

    #[test]
    fn test_rejects_bad_flight_time() {
        let state = landed(10.0, 10.0);
        for t in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                compute_score(&state, t, &multiplier(1.0)),
                Err(SimError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_rejects_unlanded() {
        let mut state = landed(10.0, 10.0);
        state.landed = false;
        assert!(matches!(
            compute_score(&state, 20.0, &multiplier(1.0)),
            Err(SimError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_legacy_rules() {
        let out = ScoringRules::Legacy
            .compute(&landed(0.0, 0.0), 30.0, &multiplier(1.0))
            .unwrap();
        assert_eq!(
            out.achievements,
            vec![Achievement::NothingButFumes, Achievement::NoTimeForChitChat]
        );
        assert_eq!(out.score, 1600);

        let out = ScoringRules::Legacy
            .compute(&landed(50.0, 0.0), 40.0, &multiplier(2.0))
            .unwrap();
        assert!(out.achievements.is_empty());
        // floor(50 / 40 * 100) * 2
        assert_eq!(out.score, 250);
    }

    #[test]
    fn test_finalize_record() {
        let state = landed(0.0, 50.0);
        let record = ScoreRecord::finalize(
            "Player 1",
            "0.3.0",
            &state,
            10.0,
            &multiplier(1.0),
            ScoringRules::Current,
            1_700_000_000.0,
        )
        .unwrap();
        assert_eq!(record.score, 1600);
        assert_eq!(record.player_name, "Player 1");
        assert_eq!(record.timestamp, 1_700_000_000.0);
        assert!(!record.crashed);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"Nothing but fumes\""));
        let back: ScoreRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_achievement_display() {
        assert_eq!(Achievement::NoTimeForChitChat.to_string(), "No time for chit-chat");
    }

    proptest! {
        #[test]
        fn prop_scoring_is_pure(
            fuel in 0.0f32..200.0,
            heat in 0.0f32..100.0,
            flight_time in 0.01f32..300.0,
            m in 0.0f32..4.0,
        ) {
            let state = landed(fuel, heat);
            let difficulty = multiplier(m);
            let first = compute_score(&state, flight_time, &difficulty).unwrap();
            let second = compute_score(&state, flight_time, &difficulty).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
