//! Configuration module for vCloud Inventory
//!
//! Provides the CLI arguments, the API connection settings and the
//! inventory settings file (templates and environment patterns).

mod inventory_settings;
mod settings;

pub use inventory_settings::*;
pub use settings::*;
