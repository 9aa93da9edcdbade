//! Prelude module for convenient imports
//!
//! ```rust
//! use damage_core::prelude::*;
//! ```

// Core types
pub use crate::target::TargetState;
pub use crate::types::DamageKind;
pub use crate::error::DamageError;

// Damage descriptors
pub use crate::damage::{DamageDescriptor, KineticDamage};

// Resolution
pub use crate::resolution::{resolve, resolve_detailed, DamageModel, DamageRegistry, ImpactReport};

// Config
pub use crate::config::{default_ammo, default_targets, AmmoCatalog, TargetCatalog};
