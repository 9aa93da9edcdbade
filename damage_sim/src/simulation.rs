//! Engagement simulation utilities

use damage_core::config::{AmmoRound, ConfigError};
use damage_core::{DamageError, DamageRegistry, ImpactReport, TargetState};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Simulation error
#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Damage(#[from] DamageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown round `{0}`")]
    UnknownAmmo(String),
    #[error("unknown target `{0}`")]
    UnknownTarget(String),
    #[error("invalid range: {0}")]
    InvalidRange(String),
}

/// One resolved shot
#[derive(Debug, Clone, Serialize)]
pub struct ShotRecord {
    /// 1-based shot number
    pub shot: u32,
    pub report: ImpactReport,
    /// State committed after this shot
    pub state: TargetState,
}

/// Sequence of rounds fired at a single target
///
/// Shots are resolved one at a time and each returned state is committed
/// before the next shot reads it.
#[derive(Debug, Clone, Serialize)]
pub struct EngagementSimulation {
    pub round_id: String,
    pub initial_state: TargetState,
    pub final_state: TargetState,
    pub shots: Vec<ShotRecord>,
    /// Shot number that destroyed the target, if any
    pub shots_to_kill: Option<u32>,
}

impl EngagementSimulation {
    /// Fire one round per distance until the distances run out or the target dies
    pub fn run(
        registry: &DamageRegistry,
        target: TargetState,
        round: &AmmoRound,
        distances: impl IntoIterator<Item = f64>,
    ) -> Result<Self, SimError> {
        let mut result = EngagementSimulation {
            round_id: round.id.clone(),
            initial_state: target,
            final_state: target,
            shots: Vec::new(),
            shots_to_kill: None,
        };

        let descriptor = round.descriptor();
        let mut state = target;

        for (index, distance) in distances.into_iter().enumerate() {
            if state.is_destroyed() {
                break;
            }

            let shot = index as u32 + 1;
            let (next, report) = registry.resolve_detailed(round.kind(), &state, &descriptor, distance)?;
            debug!(shot, summary = %report.summary(), "shot resolved");

            if report.is_killing_blow {
                result.shots_to_kill = Some(shot);
            }

            state = next;
            result.shots.push(ShotRecord {
                shot,
                report,
                state,
            });
        }

        result.final_state = state;
        Ok(result)
    }

    /// Fire `shots` rounds from a fixed range
    pub fn fixed_range(
        registry: &DamageRegistry,
        target: TargetState,
        round: &AmmoRound,
        distance: f64,
        shots: u32,
    ) -> Result<Self, SimError> {
        Self::run(registry, target, round, (0..shots).map(|_| distance))
    }

    /// Fire `shots` rounds from ranges drawn uniformly in `[min, max]`
    pub fn random_ranges(
        registry: &DamageRegistry,
        target: TargetState,
        round: &AmmoRound,
        min_distance: f64,
        max_distance: f64,
        shots: u32,
        rng: &mut impl Rng,
    ) -> Result<Self, SimError> {
        if !min_distance.is_finite() || !max_distance.is_finite() {
            return Err(SimError::InvalidRange(format!(
                "distance bounds must be finite, got {min_distance}..{max_distance}"
            )));
        }
        if min_distance > max_distance {
            return Err(SimError::InvalidRange(format!(
                "min distance {min_distance} exceeds max distance {max_distance}"
            )));
        }

        let distances: Vec<f64> = (0..shots)
            .map(|_| rng.gen_range(min_distance..=max_distance))
            .collect();
        Self::run(registry, target, round, distances)
    }

    pub fn is_destroyed(&self) -> bool {
        self.final_state.is_destroyed()
    }

    /// Sum of health damage over all shots (unclamped)
    pub fn total_damage(&self) -> f64 {
        self.shots.iter().map(|s| s.report.final_damage).sum()
    }

    pub fn total_armor_lost(&self) -> f64 {
        self.initial_state.armor - self.final_state.armor
    }

    /// Calculate average damage per shot
    pub fn avg_damage(&self) -> f64 {
        if self.shots.is_empty() {
            0.0
        } else {
            self.total_damage() / self.shots.len() as f64
        }
    }
}

/// First-shot outcome at one range
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub distance: f64,
    pub attenuated_power: f64,
    pub final_damage: f64,
    pub armor_after: f64,
    pub health_after: f64,
}

/// Upper bound on the number of ranges one sweep resolves
pub const MAX_SWEEP_POINTS: u32 = 10_000;

/// Resolve a first shot at every range from `from` to `to` in `step` increments
pub fn distance_sweep(
    registry: &DamageRegistry,
    target: TargetState,
    round: &AmmoRound,
    from: f64,
    to: f64,
    step: f64,
) -> Result<Vec<SweepPoint>, SimError> {
    if !(step > 0.0) || !step.is_finite() {
        return Err(SimError::InvalidRange(format!("step must be positive, got {step}")));
    }
    if !from.is_finite() || !to.is_finite() {
        return Err(SimError::InvalidRange(format!("sweep bounds must be finite, got {from}..{to}")));
    }
    if from > to {
        return Err(SimError::InvalidRange(format!("from {from} exceeds to {to}")));
    }

    let steps = ((to - from) / step).floor();
    if steps >= MAX_SWEEP_POINTS as f64 {
        return Err(SimError::InvalidRange(format!(
            "{from}..{to} in steps of {step} exceeds {MAX_SWEEP_POINTS} points"
        )));
    }

    let descriptor = round.descriptor();
    let mut points = Vec::new();

    for i in 0..=steps as u32 {
        let distance = from + step * i as f64;
        let (_, report) = registry.resolve_detailed(round.kind(), &target, &descriptor, distance)?;
        points.push(SweepPoint {
            distance,
            attenuated_power: report.attenuated_power,
            final_damage: report.final_damage,
            armor_after: report.armor_after,
            health_after: report.health_after,
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use damage_core::KineticDamage;
    use rand::SeedableRng;

    fn test_round() -> AmmoRound {
        AmmoRound {
            id: "test".to_string(),
            name: "Test".to_string(),
            caliber_mm: 0.0,
            kinetic: KineticDamage::new(100.0, 0.0, 10.0, 1.0),
        }
    }

    #[test]
    fn test_fixed_range_commits_each_shot() {
        let registry = DamageRegistry::with_defaults();
        let target = TargetState::new(50.0, 200.0);

        let sim = EngagementSimulation::fixed_range(&registry, target, &test_round(), 0.0, 2).unwrap();

        assert_eq!(sim.shots.len(), 2);
        // First shot: armor 30, health 130
        assert!((sim.shots[0].state.armor - 30.0).abs() < 1e-9);
        assert!((sim.shots[0].state.health - 130.0).abs() < 1e-9);
        // Second shot reads the committed 30 armor: 30 - (100 / 30) * 10 < 0
        assert_eq!(sim.final_state.armor, 0.0);
        assert!((sim.final_state.health - 30.0).abs() < 1e-9);
        assert_eq!(sim.shots_to_kill, None);
    }

    #[test]
    fn test_stops_after_kill() {
        let registry = DamageRegistry::with_defaults();
        let target = TargetState::new(10.0, 50.0);

        let sim = EngagementSimulation::fixed_range(&registry, target, &test_round(), 0.0, 10).unwrap();

        assert_eq!(sim.shots_to_kill, Some(1));
        assert_eq!(sim.shots.len(), 1);
        assert!(sim.is_destroyed());
    }

    #[test]
    fn test_random_ranges_deterministic_with_seed() {
        let registry = DamageRegistry::with_defaults();
        let target = TargetState::new(200.0, 10_000.0);
        let mut round = test_round();
        round.kinetic.friction = 0.001;

        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let a = EngagementSimulation::random_ranges(&registry, target, &round, 100.0, 2000.0, 5, &mut rng)
            .unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let b = EngagementSimulation::random_ranges(&registry, target, &round, 100.0, 2000.0, 5, &mut rng)
            .unwrap();

        assert_eq!(a.final_state, b.final_state);
        for shot in &a.shots {
            assert!(shot.report.distance >= 100.0 && shot.report.distance <= 2000.0);
        }
    }

    #[test]
    fn test_random_ranges_rejects_inverted_bounds() {
        let registry = DamageRegistry::with_defaults();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let result = EngagementSimulation::random_ranges(
            &registry,
            TargetState::new(10.0, 10.0),
            &test_round(),
            500.0,
            100.0,
            3,
            &mut rng,
        );
        assert!(matches!(result, Err(SimError::InvalidRange(_))));
    }

    #[test]
    fn test_random_ranges_rejects_infinite_bounds() {
        let registry = DamageRegistry::with_defaults();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        for (min, max) in [(0.0, f64::INFINITY), (f64::NEG_INFINITY, 100.0), (f64::NAN, 100.0)] {
            let result = EngagementSimulation::random_ranges(
                &registry,
                TargetState::new(10.0, 10.0),
                &test_round(),
                min,
                max,
                3,
                &mut rng,
            );
            assert!(matches!(result, Err(SimError::InvalidRange(_))), "{min}..{max}");
        }
    }

    #[test]
    fn test_sweep_damage_falls_off() {
        let registry = DamageRegistry::with_defaults();
        let mut round = test_round();
        round.kinetic.friction = 0.0005;

        let points =
            distance_sweep(&registry, TargetState::new(50.0, 200.0), &round, 0.0, 3000.0, 500.0).unwrap();

        assert_eq!(points.len(), 7);
        for pair in points.windows(2) {
            assert!(pair[1].final_damage <= pair[0].final_damage);
        }
    }

    #[test]
    fn test_sweep_rejects_zero_step() {
        let registry = DamageRegistry::with_defaults();
        let result = distance_sweep(&registry, TargetState::new(50.0, 200.0), &test_round(), 0.0, 10.0, 0.0);
        assert!(matches!(result, Err(SimError::InvalidRange(_))));
    }

    #[test]
    fn test_sweep_rejects_infinite_bounds() {
        let registry = DamageRegistry::with_defaults();
        let target = TargetState::new(50.0, 200.0);
        let round = test_round();

        let result = distance_sweep(&registry, target, &round, 0.0, f64::INFINITY, 250.0);
        assert!(matches!(result, Err(SimError::InvalidRange(_))));
        let result = distance_sweep(&registry, target, &round, f64::NEG_INFINITY, 0.0, 250.0);
        assert!(matches!(result, Err(SimError::InvalidRange(_))));
    }

    #[test]
    fn test_sweep_point_limit() {
        let registry = DamageRegistry::with_defaults();
        let target = TargetState::new(50.0, 200.0);
        let round = test_round();

        let result = distance_sweep(&registry, target, &round, 0.0, 1e12, 1.0);
        assert!(matches!(result, Err(SimError::InvalidRange(_))));

        // Exactly at the limit still resolves
        let last = (MAX_SWEEP_POINTS - 1) as f64;
        let points = distance_sweep(&registry, target, &round, 0.0, last, 1.0).unwrap();
        assert_eq!(points.len(), MAX_SWEEP_POINTS as usize);
        assert_eq!(points[points.len() - 1].distance, last);
    }
}
