//! Impact resolution - apply a damage descriptor to a target state

mod registry;
mod report;
mod resolve;

pub use registry::{DamageModel, DamageRegistry, KineticModel};
pub use report::ImpactReport;
pub use resolve::{resolve, resolve_detailed};
