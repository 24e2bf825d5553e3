//! Field Configuration Module
//!
//! Field name, default simulation parameters, engine tuning and server
//! settings, loaded from a TOML file.
//!
//! ## Loading Order
//!
//! 1. `GASFIELD_CONFIG` environment variable (path to TOML file)
//! 2. `field_config.toml` in the current working directory
//! 3. Built-in defaults (the reference development case)
//!
//! The loaded [`FieldConfig`] is passed explicitly to whatever needs it.
//! Simulation runs never read configuration on their own.

mod field_config;
pub mod defaults;
pub mod validation;

pub use field_config::*;
