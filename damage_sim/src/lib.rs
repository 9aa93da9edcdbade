//! damage_sim - engagement simulator over damage_core
//!
//! Exposes the simulation and logging helpers for use by the CLI and tests.

pub mod logging;
pub mod simulation;
