//! Target profile loading

use super::ConfigError;
use crate::target::TargetState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Initial state of a target type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub state: TargetState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TargetsConfig {
    #[serde(default)]
    targets: Vec<TargetProfile>,
}

/// Target profiles keyed by id
#[derive(Debug, Clone, Default)]
pub struct TargetCatalog {
    targets: HashMap<String, TargetProfile>,
}

impl TargetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile, rejecting duplicate ids and invalid states
    pub fn insert(&mut self, profile: TargetProfile) -> Result<(), ConfigError> {
        profile
            .state
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("target `{}`: {}", profile.id, e)))?;

        if self.targets.contains_key(&profile.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate target id `{}`",
                profile.id
            )));
        }

        self.targets.insert(profile.id.clone(), profile);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&TargetProfile> {
        self.targets.get(id)
    }

    /// A fresh copy of the profile's initial state
    pub fn spawn(&self, id: &str) -> Option<TargetState> {
        self.get(id).map(|p| p.state)
    }

    /// All target ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.targets.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

fn build_catalog(config: TargetsConfig) -> Result<TargetCatalog, ConfigError> {
    let mut catalog = TargetCatalog::new();
    for profile in config.targets {
        catalog.insert(profile)?;
    }
    Ok(catalog)
}

/// Load target profiles from a TOML file
pub fn load_target_catalog(path: &Path) -> Result<TargetCatalog, ConfigError> {
    build_catalog(super::load_toml(path)?)
}

/// Load target profiles from a TOML string
pub fn parse_target_catalog(content: &str) -> Result<TargetCatalog, ConfigError> {
    build_catalog(super::parse_toml(content)?)
}

/// Get the bundled target profiles
pub fn default_targets() -> TargetCatalog {
    let toml = include_str!("../../config/targets.toml");
    parse_target_catalog(toml).unwrap_or_else(|err| {
        warn!(%err, "bundled target catalog failed to load");
        TargetCatalog::new()
    })
}
