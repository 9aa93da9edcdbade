//! ImpactReport - Breakdown of a single resolved impact

use crate::target::TargetState;
use crate::types::DamageKind;
use serde::{Deserialize, Serialize};

/// Every intermediate quantity of one resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub kind: DamageKind,
    /// Engagement range the impact was resolved at
    pub distance: f64,

    // === Power ===
    /// Power before attenuation
    pub initial_power: f64,
    /// Power after air friction
    pub attenuated_power: f64,
    /// Power left for the armor after the ERA
    pub post_era_power: f64,

    // === Reactive Armor ===
    /// Whether the ERA reacted (it had charge left)
    pub era_applied: bool,
    /// Charge stripped by the penetrator (unclamped)
    pub era_consumed: f64,
    pub era_before: f64,
    pub era_after: f64,

    // === Armor ===
    pub armor_before: f64,
    pub armor_after: f64,

    // === Health ===
    /// Health damage dealt, before clamping against remaining health
    pub final_damage: f64,
    pub health_before: f64,
    pub health_after: f64,

    /// Target was alive before this hit and is not after it
    pub is_killing_blow: bool,
}

impl ImpactReport {
    /// Start a report for a target about to be hit
    pub fn new(kind: DamageKind, before: &TargetState, distance: f64) -> Self {
        ImpactReport {
            kind,
            distance,
            initial_power: 0.0,
            attenuated_power: 0.0,
            post_era_power: 0.0,
            era_applied: false,
            era_consumed: 0.0,
            era_before: before.era_charge,
            era_after: before.era_charge,
            armor_before: before.armor,
            armor_after: before.armor,
            final_damage: 0.0,
            health_before: before.health,
            health_after: before.health,
            is_killing_blow: false,
        }
    }

    /// Fill in the post-impact side from the resolved state
    pub fn record_after(&mut self, after: &TargetState) {
        self.era_after = after.era_charge;
        self.armor_after = after.armor;
        self.health_after = after.health;
        self.is_killing_blow = self.health_before > 0.0 && after.health <= 0.0;
    }

    pub fn armor_lost(&self) -> f64 {
        self.armor_before - self.armor_after
    }

    pub fn health_lost(&self) -> f64 {
        self.health_before - self.health_after
    }

    pub fn era_lost(&self) -> f64 {
        self.era_before - self.era_after
    }

    /// Power removed by air friction
    pub fn power_lost_to_friction(&self) -> f64 {
        self.initial_power - self.attenuated_power
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        parts.push(format!(
            "{:.1} power at {:.0}m",
            self.attenuated_power, self.distance
        ));

        if self.power_lost_to_friction() > 0.0 {
            parts.push(format!("-{:.1} to drag", self.power_lost_to_friction()));
        }

        if self.era_applied {
            parts.push(format!("ERA -{:.1} charge", self.era_lost()));
        }

        if self.armor_lost() > 0.0 {
            parts.push(format!("{:.1} armor stripped", self.armor_lost()));
        }

        if self.final_damage > 0.0 {
            parts.push(format!("{:.1} damage", self.final_damage));
        } else {
            parts.push("no penetration".to_string());
        }

        if self.is_killing_blow {
            parts.push("DESTROYED".to_string());
        }

        parts.join(", ")
    }
}
