//! damage_core - Impact resolution for armored targets
//!
//! This library provides:
//! - TargetState: armor, reactive armor charge and health of a struck entity
//! - DamageDescriptor: per-impact input, tagged by damage kind
//! - Resolution: pure functions turning (target, descriptor, distance) into a new target
//! - DamageRegistry: open set of per-kind algorithms
//! - Config: ammunition and target catalogs loaded from TOML

pub mod config;
pub mod damage;
pub mod error;
pub mod prelude;
pub mod resolution;
pub mod target;
pub mod types;

// Re-export core types for convenience
pub use damage::{DamageDescriptor, KineticDamage};
pub use error::DamageError;
pub use resolution::{resolve, resolve_detailed, DamageModel, DamageRegistry, ImpactReport};
pub use target::TargetState;
pub use types::DamageKind;
