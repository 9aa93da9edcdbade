//! Damage descriptors - per-impact input built by the caller from ammunition data

use crate::error::{ensure_non_negative, DamageError};
use crate::types::DamageKind;
use serde::{Deserialize, Serialize};

/// Kinetic penetrator parameters for a single impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticDamage {
    /// Power at the muzzle / reference point
    pub power: f64,
    /// Air drag coefficient, applied per unit of distance
    #[serde(default)]
    pub friction: f64,
    /// Armor consumed per unit of incoming power
    #[serde(default)]
    pub degradation: f64,
    /// Converts power that gets past the armor into health damage
    #[serde(default = "default_health_damage_factor")]
    pub health_damage_factor: f64,
}

fn default_health_damage_factor() -> f64 {
    1.0
}

impl Default for KineticDamage {
    fn default() -> Self {
        KineticDamage {
            power: 0.0,
            friction: 0.0,
            degradation: 0.0,
            health_damage_factor: default_health_damage_factor(),
        }
    }
}

impl KineticDamage {
    pub fn new(power: f64, friction: f64, degradation: f64, health_damage_factor: f64) -> Self {
        KineticDamage {
            power,
            friction,
            degradation,
            health_damage_factor,
        }
    }

    /// Check all coefficients are finite and non-negative
    pub fn validate(&self) -> Result<(), DamageError> {
        ensure_non_negative("power", self.power)?;
        ensure_non_negative("friction", self.friction)?;
        ensure_non_negative("degradation", self.degradation)?;
        ensure_non_negative("health_damage_factor", self.health_damage_factor)?;
        Ok(())
    }

    /// Power remaining after travelling `distance` through air
    pub fn attenuated_power(&self, distance: f64) -> f64 {
        super::kinetic::attenuate(self.power, self.friction, distance)
    }
}

/// Input for one impact, tagged by damage kind
///
/// Each variant carries exactly what its algorithm reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum DamageDescriptor {
    Kinetic(KineticDamage),
}

impl DamageDescriptor {
    /// The damage kind this descriptor belongs to
    pub fn kind(&self) -> DamageKind {
        match self {
            DamageDescriptor::Kinetic(_) => DamageKind::KineticEnergy,
        }
    }

    pub fn as_kinetic(&self) -> Option<&KineticDamage> {
        match self {
            DamageDescriptor::Kinetic(ke) => Some(ke),
        }
    }

    pub fn validate(&self) -> Result<(), DamageError> {
        match self {
            DamageDescriptor::Kinetic(ke) => ke.validate(),
        }
    }
}

impl From<KineticDamage> for DamageDescriptor {
    fn from(ke: KineticDamage) -> Self {
        DamageDescriptor::Kinetic(ke)
    }
}
