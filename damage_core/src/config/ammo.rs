//! Ammunition catalog loading

use super::ConfigError;
use crate::damage::{DamageDescriptor, KineticDamage};
use crate::types::DamageKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// A kinetic round as described in weapon data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoRound {
    /// Unique identifier (e.g., "apfsds_125")
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub caliber_mm: f64,
    /// Penetrator coefficients
    pub kinetic: KineticDamage,
}

impl AmmoRound {
    pub fn kind(&self) -> DamageKind {
        DamageKind::KineticEnergy
    }

    /// Build the per-impact descriptor for this round
    pub fn descriptor(&self) -> DamageDescriptor {
        DamageDescriptor::Kinetic(self.kinetic)
    }
}

/// Container for ammunition configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AmmoConfig {
    #[serde(default)]
    rounds: Vec<AmmoRound>,
}

/// Rounds keyed by id
#[derive(Debug, Clone, Default)]
pub struct AmmoCatalog {
    rounds: HashMap<String, AmmoRound>,
}

impl AmmoCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a round, rejecting duplicate ids and invalid coefficients
    pub fn insert(&mut self, round: AmmoRound) -> Result<(), ConfigError> {
        round
            .kinetic
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("round `{}`: {}", round.id, e)))?;

        if self.rounds.contains_key(&round.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate round id `{}`",
                round.id
            )));
        }

        self.rounds.insert(round.id.clone(), round);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&AmmoRound> {
        self.rounds.get(id)
    }

    /// All round ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.rounds.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

fn build_catalog(config: AmmoConfig) -> Result<AmmoCatalog, ConfigError> {
    let mut catalog = AmmoCatalog::new();
    for round in config.rounds {
        catalog.insert(round)?;
    }
    Ok(catalog)
}

/// Load an ammunition catalog from a TOML file
pub fn load_ammo_catalog(path: &Path) -> Result<AmmoCatalog, ConfigError> {
    build_catalog(super::load_toml(path)?)
}

/// Load an ammunition catalog from a TOML string
pub fn parse_ammo_catalog(content: &str) -> Result<AmmoCatalog, ConfigError> {
    build_catalog(super::parse_toml(content)?)
}

/// Get the bundled ammunition catalog
pub fn default_ammo() -> AmmoCatalog {
    let toml = include_str!("../../config/ammo.toml");
    parse_ammo_catalog(toml).unwrap_or_else(|err| {
        warn!(%err, "bundled ammunition catalog failed to load");
        AmmoCatalog::new()
    })
}
