//! Inventory of vApps across the vCloud hierarchy
//!
//! The walker visits organizations, their VDCs and the vApps inside them,
//! producing a [`Server`] record per vApp classified into an environment tier.

mod classify;
mod server;
mod walker;

pub use classify::{base_memory_gb, classify, EnvironmentTier, DEVELOPMENT, PRODUCTION, STAGING};
pub use server::{sort_servers, Server, ServerSummary};
pub use walker::InventoryWalker;

#[cfg(test)]
pub(crate) use server::tests as server_fixtures;
