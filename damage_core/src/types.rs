//! Core types shared across the resolution pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of damage carried by an impact
///
/// Only `KineticEnergy` has a resolution algorithm. The other kinds can be
/// named by callers and registered later through a `DamageRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    /// Solid penetrators (APFSDS, AP shot)
    KineticEnergy,
    /// Blast and fragmentation
    HighExplosive,
    /// Shaped charge jets
    Heat,
    /// Incendiary effects
    Fire,
}

impl DamageKind {
    /// Get all damage kinds
    pub fn all() -> &'static [DamageKind] {
        &[
            DamageKind::KineticEnergy,
            DamageKind::HighExplosive,
            DamageKind::Heat,
            DamageKind::Fire,
        ]
    }

    /// Short identifier, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageKind::KineticEnergy => "kinetic_energy",
            DamageKind::HighExplosive => "high_explosive",
            DamageKind::Heat => "heat",
            DamageKind::Fire => "fire",
        }
    }
}

impl fmt::Display for DamageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
