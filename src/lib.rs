//! # vCloud Inventory - vApp inventory for VMware vCloud Director
//!
//! vCloud Inventory logs in to a vCloud Director installation, walks every
//! organization, virtual datacenter and vApp the account can see, and
//! classifies each vApp into an environment tier from its name.
//!
//! ## Features
//!
//! - **Inventory walk**: organizations in name order, VDCs and vApps as listed
//! - **Environment classification**: regex rules from the settings file
//! - **Spreadsheet export**: one `.xlsx` row per vApp with sizing and network data
//! - **Catalog backup**: capture a vApp into a template and add it to a catalog
//!
//! ## Quick Start
//!
//! ```no_run
//! use vcloud_inventory::config::{ConnectionConfig, InventorySettings};
//! use vcloud_inventory::inventory::{sort_servers, InventoryWalker};
//! use vcloud_inventory::vcloud::{Client, DefaultClient};
//! use vcloud_inventory::config::SortKey;
//!
//! # async fn run(config: ConnectionConfig) -> vcloud_inventory::Result<()> {
//! let settings = InventorySettings::load("lib_settings.xml")?;
//! let client = DefaultClient::create(&config, None)?;
//! client.login().await?;
//!
//! let walker = InventoryWalker::new(&config.data_center, settings.environments().to_vec());
//! let mut servers = walker.walk(&client).await?;
//! sort_servers(&mut servers, SortKey::Environment);
//!
//! for server in &servers {
//!     println!("{} {}", server.environment(), server.name());
//! }
//! client.logout().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Export
//!
//! ```no_run
//! use vcloud_inventory::export::SpreadsheetExporter;
//! # use vcloud_inventory::config::InventorySettings;
//! # use vcloud_inventory::inventory::Server;
//! # fn export(settings: &InventorySettings, servers: &[Server]) -> vcloud_inventory::Result<()> {
//! let stats = SpreadsheetExporter::new(settings.templates())
//!     .export(servers, std::path::Path::new("inventory.xlsx"))?;
//! println!("{} rows", stats.rows);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod backup;
pub mod config;
pub mod error;
pub mod export;
pub mod inventory;
pub mod progress;
pub mod vcloud;

// Re-export commonly used types
pub use config::{ConnectionConfig, InventorySettings, SortKey};
pub use error::{InventoryError, Result};
pub use inventory::{EnvironmentTier, InventoryWalker, Server};
pub use progress::ProgressReporter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use vcloud_inventory::prelude::*;
    //! ```

    pub use crate::backup::{BackupMode, BackupOutcome, BackupService};
    pub use crate::config::{ConnectionConfig, EnvironmentRule, InventorySettings, SortKey, Template};
    pub use crate::error::{InventoryError, Result};
    pub use crate::export::{ServerDetail, SpreadsheetExporter};
    pub use crate::inventory::{classify, sort_servers, EnvironmentTier, InventoryWalker, Server};
    pub use crate::progress::ProgressReporter;
    pub use crate::vcloud::{Client, DefaultClient};
}
