//! TargetState - Armor, reactive armor and health of a struck entity

use crate::error::{ensure_fraction, ensure_non_negative, DamageError};
use serde::{Deserialize, Serialize};

/// Snapshot of a target as seen by the resolver
///
/// The resolver never mutates a live target. It returns a new `TargetState`
/// and the owner of the entity commits it back.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetState {
    /// Effective armor thickness
    pub armor: f64,
    /// Remaining hit points
    pub health: f64,
    /// Remaining explosive reactive armor material
    #[serde(default)]
    pub era_charge: f64,
    /// Fraction of an incoming penetrator's power the ERA neutralizes (0..=1)
    #[serde(default)]
    pub era_ke_fraction_multiplier: f64,
}

impl TargetState {
    /// Create a target without reactive armor
    pub fn new(armor: f64, health: f64) -> Self {
        TargetState {
            armor,
            health,
            era_charge: 0.0,
            era_ke_fraction_multiplier: 0.0,
        }
    }

    /// Fit reactive armor to this target
    pub fn with_era(mut self, charge: f64, ke_fraction_multiplier: f64) -> Self {
        self.era_charge = charge;
        self.era_ke_fraction_multiplier = ke_fraction_multiplier;
        self
    }

    /// Check every field against its invariant
    pub fn validate(&self) -> Result<(), DamageError> {
        ensure_non_negative("armor", self.armor)?;
        ensure_non_negative("health", self.health)?;
        ensure_non_negative("era_charge", self.era_charge)?;
        ensure_fraction("era_ke_fraction_multiplier", self.era_ke_fraction_multiplier)?;
        Ok(())
    }

    /// Whether reactive armor can still interact with a penetrator
    pub fn has_era(&self) -> bool {
        self.era_charge > 0.0
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}
