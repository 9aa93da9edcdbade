//! Kinetic energy resolution - penetrator vs armor, ERA and health
//!
//! Pipeline, each stage feeding the next:
//! 1. Air friction: `power * exp(-friction * distance)`
//! 2. ERA (only while charge remains): the ERA eats `power * m` of its charge
//!    and lets `power * (1 - m)` through
//! 3. Armor degradation: `armor - power * degradation / armor`
//! 4. Health damage: `(power - new_armor) * health_damage_factor`
//!
//! Every stage clamps at zero. Power and armor thickness are treated as the
//! same dimensionless unit.

use super::KineticDamage;
use crate::error::{ensure_non_negative, DamageError};
use crate::resolution::ImpactReport;
use crate::target::TargetState;
use crate::types::DamageKind;
use tracing::trace;

/// Outcome of the penetrator meeting reactive armor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraInteraction {
    /// Whether the ERA had any charge to react with
    pub applied: bool,
    /// Charge the penetrator would strip (before clamping to what was left)
    pub consumed: f64,
    /// Charge left after the hit
    pub remaining_charge: f64,
    /// Power that continues on to the armor
    pub power: f64,
}

/// Exponential air-friction attenuation
pub fn attenuate(power: f64, friction: f64, distance: f64) -> f64 {
    ((-friction * distance).exp() * power).max(0.0)
}

/// Let the reactive armor act on an incoming penetrator
///
/// Depleted ERA (charge <= 0) is skipped entirely and the power passes
/// through unchanged.
pub fn apply_era(power: f64, charge: f64, ke_fraction_multiplier: f64) -> EraInteraction {
    if charge <= 0.0 {
        return EraInteraction {
            applied: false,
            consumed: 0.0,
            remaining_charge: charge,
            power,
        };
    }

    let consumed = power * ke_fraction_multiplier;
    EraInteraction {
        applied: true,
        consumed,
        remaining_charge: (charge - consumed).max(0.0),
        power: (power * (1.0 - ke_fraction_multiplier)).max(0.0),
    }
}

/// Armor left after absorbing `power`
///
/// A target with no armor left stays at zero; there is nothing to divide by.
/// The product is taken before dividing so that zero power or zero
/// degradation leaves even a vanishingly thin plate untouched.
pub fn degrade_armor(armor: f64, power: f64, degradation: f64) -> f64 {
    if armor <= 0.0 {
        return 0.0;
    }
    (armor - power * degradation / armor).max(0.0)
}

/// Health damage from the power that exceeds the remaining armor
pub fn health_damage(power: f64, armor: f64, health_damage_factor: f64) -> f64 {
    ((power - armor) * health_damage_factor).max(0.0)
}

/// Resolve a kinetic impact, returning the new target state and a breakdown
pub fn resolve_kinetic(
    target: &TargetState,
    ke: &KineticDamage,
    distance: f64,
) -> Result<(TargetState, ImpactReport), DamageError> {
    target.validate()?;
    ke.validate()?;
    ensure_non_negative("distance", distance)?;

    let mut report = ImpactReport::new(DamageKind::KineticEnergy, target, distance);
    report.initial_power = ke.power;

    // Step 1: air friction
    let attenuated = attenuate(ke.power, ke.friction, distance);
    report.attenuated_power = attenuated;

    // Step 2: reactive armor
    let era = apply_era(
        attenuated,
        target.era_charge,
        target.era_ke_fraction_multiplier,
    );
    report.era_applied = era.applied;
    report.era_consumed = era.consumed;
    report.post_era_power = era.power;

    // Step 3: armor degradation, against the armor as it was before this hit
    let new_armor = degrade_armor(target.armor, era.power, ke.degradation);

    // Step 4: health, against the armor as it is after this hit
    let final_damage = health_damage(era.power, new_armor, ke.health_damage_factor);
    let new_health = (target.health - final_damage).max(0.0);

    let new_state = TargetState {
        armor: new_armor,
        health: new_health,
        era_charge: era.remaining_charge,
        era_ke_fraction_multiplier: target.era_ke_fraction_multiplier,
    };

    report.final_damage = final_damage;
    report.record_after(&new_state);

    trace!(
        distance,
        attenuated,
        post_era = era.power,
        armor = new_armor,
        damage = final_damage,
        health = new_health,
        "resolved kinetic impact"
    );

    Ok((new_state, report))
}
