//! Damage descriptors and per-kind algorithms

mod descriptor;
pub mod kinetic;

pub use descriptor::{DamageDescriptor, KineticDamage};
pub use kinetic::{apply_era, attenuate, degrade_armor, health_damage, resolve_kinetic, EraInteraction};
