//! Backup of vApps into a catalog
//!
//! A backup powers the vApp off, captures it as a vApp template in its VDC,
//! registers the template in the organization's backup catalog and powers the
//! vApp back on. [`BackupMode::Validate`] stops after checking the server.

mod service;

pub use service::{BackupMode, BackupOutcome, BackupService};
