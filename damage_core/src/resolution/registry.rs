//! Damage model registry - open set of per-kind resolution algorithms

use super::ImpactReport;
use crate::damage::{resolve_kinetic, DamageDescriptor};
use crate::error::DamageError;
use crate::target::TargetState;
use crate::types::DamageKind;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// A resolution algorithm for one damage kind
///
/// Implementations must be pure: the same inputs always give the same
/// output and nothing outside the returned state changes.
pub trait DamageModel: Send + Sync {
    /// The kind this model resolves
    fn kind(&self) -> DamageKind;

    /// Resolve an impact, returning the new state and its breakdown
    fn resolve_detailed(
        &self,
        target: &TargetState,
        descriptor: &DamageDescriptor,
        distance: f64,
    ) -> Result<(TargetState, ImpactReport), DamageError>;

    /// Resolve an impact, returning only the new state
    fn resolve(
        &self,
        target: &TargetState,
        descriptor: &DamageDescriptor,
        distance: f64,
    ) -> Result<TargetState, DamageError> {
        self.resolve_detailed(target, descriptor, distance)
            .map(|(state, _)| state)
    }
}

/// Kinetic energy penetrators
#[derive(Debug, Clone, Copy, Default)]
pub struct KineticModel;

impl DamageModel for KineticModel {
    fn kind(&self) -> DamageKind {
        DamageKind::KineticEnergy
    }

    fn resolve_detailed(
        &self,
        target: &TargetState,
        descriptor: &DamageDescriptor,
        distance: f64,
    ) -> Result<(TargetState, ImpactReport), DamageError> {
        let DamageDescriptor::Kinetic(ke) = descriptor;
        resolve_kinetic(target, ke, distance)
    }
}

/// Damage model registry
#[derive(Default)]
pub struct DamageRegistry {
    /// Mapping from damage kind to its algorithm
    models: HashMap<DamageKind, Box<dyn DamageModel>>,
}

impl DamageRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        DamageRegistry {
            models: HashMap::new(),
        }
    }

    /// Registry with every built-in algorithm
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(KineticModel);
        registry
    }

    /// Register a model under its kind, replacing any previous one
    pub fn register<M: DamageModel + 'static>(&mut self, model: M) {
        let kind = model.kind();
        if self.models.insert(kind, Box::new(model)).is_some() {
            debug!(%kind, "replaced damage model");
        } else {
            debug!(%kind, "registered damage model");
        }
    }

    /// Get the model for a kind
    pub fn get(&self, kind: DamageKind) -> Option<&dyn DamageModel> {
        self.models.get(&kind).map(|m| &**m)
    }

    pub fn contains(&self, kind: DamageKind) -> bool {
        self.models.contains_key(&kind)
    }

    /// Registered kinds, in declaration order
    pub fn kinds(&self) -> Vec<DamageKind> {
        let mut kinds: Vec<DamageKind> = self.models.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Resolve an impact with the model registered for `kind`
    pub fn resolve(
        &self,
        kind: DamageKind,
        target: &TargetState,
        descriptor: &DamageDescriptor,
        distance: f64,
    ) -> Result<TargetState, DamageError> {
        self.resolve_detailed(kind, target, descriptor, distance)
            .map(|(state, _)| state)
    }

    /// Resolve an impact and return its breakdown
    pub fn resolve_detailed(
        &self,
        kind: DamageKind,
        target: &TargetState,
        descriptor: &DamageDescriptor,
        distance: f64,
    ) -> Result<(TargetState, ImpactReport), DamageError> {
        let Some(model) = self.get(kind) else {
            warn!(%kind, "no damage model registered");
            return Err(DamageError::UnsupportedKind(kind));
        };

        if descriptor.kind() != kind {
            return Err(DamageError::invalid(
                "descriptor",
                format!("expected {} descriptor, got {}", kind, descriptor.kind()),
            ));
        }

        model.resolve_detailed(target, descriptor, distance)
    }
}

impl fmt::Debug for DamageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DamageRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
