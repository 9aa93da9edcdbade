//! Closed-set dispatch over the built-in damage kinds

use super::ImpactReport;
use crate::damage::{resolve_kinetic, DamageDescriptor};
use crate::error::DamageError;
use crate::target::TargetState;
use crate::types::DamageKind;

/// Resolve an impact against a target (immutable API)
///
/// Returns the new target state; the caller commits it back to its entity.
/// Kinds without an algorithm fail with `UnsupportedKind`.
pub fn resolve(
    kind: DamageKind,
    target: TargetState,
    descriptor: DamageDescriptor,
    distance: f64,
) -> Result<TargetState, DamageError> {
    resolve_detailed(kind, target, descriptor, distance).map(|(state, _)| state)
}

/// Resolve an impact and also return the per-step breakdown
pub fn resolve_detailed(
    kind: DamageKind,
    target: TargetState,
    descriptor: DamageDescriptor,
    distance: f64,
) -> Result<(TargetState, ImpactReport), DamageError> {
    match (kind, descriptor) {
        (DamageKind::KineticEnergy, DamageDescriptor::Kinetic(ke)) => {
            resolve_kinetic(&target, &ke, distance)
        }
        (DamageKind::HighExplosive | DamageKind::Heat | DamageKind::Fire, _) => {
            Err(DamageError::UnsupportedKind(kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::KineticDamage;
    use proptest::prelude::*;

    fn kinetic(power: f64, friction: f64, degradation: f64) -> DamageDescriptor {
        KineticDamage::new(power, friction, degradation, 1.0).into()
    }

    #[test]
    fn test_plain_hit() {
        let target = TargetState::new(50.0, 200.0);
        let state = resolve(DamageKind::KineticEnergy, target, kinetic(100.0, 0.0, 10.0), 0.0).unwrap();

        assert!((state.armor - 30.0).abs() < 1e-9);
        assert!((state.health - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_era_hit() {
        let target = TargetState::new(50.0, 200.0).with_era(5.0, 0.5);
        let state = resolve(DamageKind::KineticEnergy, target, kinetic(100.0, 0.0, 10.0), 0.0).unwrap();

        assert_eq!(state.era_charge, 0.0);
        assert!((state.armor - 40.0).abs() < 1e-9);
        assert!((state.health - 190.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_armor_target() {
        for (power, degradation) in [(0.0, 0.0), (10.0, 1e6), (1e6, 3.0)] {
            let target = TargetState::new(0.0, 1e7);
            let state = resolve(
                DamageKind::KineticEnergy,
                target,
                kinetic(power, 0.0, degradation),
                0.0,
            )
            .unwrap();
            assert_eq!(state.armor, 0.0);
            assert!(state.health.is_finite());
        }
    }

    #[test]
    fn test_unsupported_kinds() {
        let target = TargetState::new(50.0, 200.0);
        for kind in [DamageKind::HighExplosive, DamageKind::Heat, DamageKind::Fire] {
            let err = resolve(kind, target, kinetic(100.0, 0.0, 10.0), 0.0).unwrap_err();
            assert_eq!(err, DamageError::UnsupportedKind(kind));
        }
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let target = TargetState::new(50.0, 200.0);
        let cases = [
            (kinetic(-1.0, 0.0, 10.0), 0.0),
            (kinetic(100.0, -0.5, 10.0), 0.0),
            (kinetic(100.0, 0.0, -10.0), 0.0),
            (kinetic(100.0, 0.0, 10.0), -100.0),
        ];
        for (descriptor, distance) in cases {
            let err = resolve(DamageKind::KineticEnergy, target, descriptor, distance).unwrap_err();
            assert!(err.is_invalid_input(), "expected InvalidInput, got {err:?}");
        }
    }

    #[test]
    fn test_detailed_matches_plain() {
        let target = TargetState::new(35.0, 120.0).with_era(20.0, 0.3);
        let descriptor = kinetic(140.0, 0.0008, 6.0);

        let plain = resolve(DamageKind::KineticEnergy, target, descriptor, 900.0).unwrap();
        let (detailed, report) =
            resolve_detailed(DamageKind::KineticEnergy, target, descriptor, 900.0).unwrap();

        assert_eq!(plain, detailed);
        assert_eq!(report.health_after, detailed.health);
        assert_eq!(report.kind, DamageKind::KineticEnergy);
    }

    fn arb_target() -> impl Strategy<Value = TargetState> {
        (0.0..500.0f64, 0.0..1000.0f64, 0.0..200.0f64, 0.0..=1.0f64).prop_map(
            |(armor, health, charge, multiplier)| {
                TargetState::new(armor, health).with_era(charge, multiplier)
            },
        )
    }

    fn arb_round() -> impl Strategy<Value = KineticDamage> {
        (0.0..1000.0f64, 0.0..0.01f64, 0.0..50.0f64, 0.0..4.0f64).prop_map(
            |(power, friction, degradation, factor)| {
                KineticDamage::new(power, friction, degradation, factor)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_state_never_negative(
            target in arb_target(),
            round in arb_round(),
            distance in 0.0..5000.0f64,
        ) {
            let state = resolve(DamageKind::KineticEnergy, target, round.into(), distance).unwrap();
            prop_assert!(state.armor >= 0.0);
            prop_assert!(state.health >= 0.0);
            prop_assert!(state.era_charge >= 0.0);
            prop_assert!(state.armor <= target.armor);
            prop_assert!(state.health <= target.health);
            prop_assert_eq!(state.era_ke_fraction_multiplier, target.era_ke_fraction_multiplier);
        }

        #[test]
        fn prop_damage_falls_with_distance(
            target in arb_target(),
            round in arb_round(),
            near in 0.0..3000.0f64,
            extra in 0.0..3000.0f64,
        ) {
            let (_, close) = resolve_detailed(DamageKind::KineticEnergy, target, round.into(), near).unwrap();
            let (_, far) = resolve_detailed(DamageKind::KineticEnergy, target, round.into(), near + extra).unwrap();
            prop_assert!(far.final_damage <= close.final_damage * (1.0 + 1e-12) + 1e-9);
        }

        #[test]
        fn prop_zero_power_is_noop(
            target in arb_target(),
            friction in 0.0..0.01f64,
            degradation in 0.0..50.0f64,
            distance in 0.0..5000.0f64,
        ) {
            let round = KineticDamage::new(0.0, friction, degradation, 1.0);
            let state = resolve(DamageKind::KineticEnergy, target, round.into(), distance).unwrap();
            prop_assert_eq!(state, target);
        }

        #[test]
        fn prop_depleted_era_is_skipped(
            armor in 0.0..500.0f64,
            health in 0.0..1000.0f64,
            multiplier in 0.0..=1.0f64,
            round in arb_round(),
            distance in 0.0..5000.0f64,
        ) {
            let target = TargetState::new(armor, health).with_era(0.0, multiplier);
            let (state, report) = resolve_detailed(DamageKind::KineticEnergy, target, round.into(), distance).unwrap();
            prop_assert!(!report.era_applied);
            prop_assert_eq!(report.post_era_power, report.attenuated_power);
            prop_assert_eq!(state.era_charge, 0.0);
        }
    }
}
