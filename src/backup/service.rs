use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::{InventoryError, Result};
use crate::inventory::Server;
use crate::vcloud::{
    wait_for_task, CaptureVAppParams, CatalogItemParams, Client, Reference, DEFAULT_POLL_INTERVAL,
};

/// How far a backup goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupMode {
    /// Check that the server can be captured, without touching it
    Validate,
    /// Power off, capture into the catalog and power back on
    Capture,
}

/// Result of a successful backup
#[derive(Debug, Clone)]
pub enum BackupOutcome {
    /// The capture request that would have been sent
    Validated { params: CaptureVAppParams },
    /// The template captured and the catalog it was added to
    Captured { template: Reference, catalog: Reference },
}

/// Captures vApps into an organization catalog
pub struct BackupService<'a, C: ?Sized> {
    client: &'a C,
    catalog_name: Option<String>,
    task_timeout: Duration,
    poll_interval: Duration,
}

impl<'a, C> BackupService<'a, C>
where
    C: Client + Sync + ?Sized,
{
    pub fn new(client: &'a C, catalog_name: Option<String>) -> Self {
        Self {
            client,
            catalog_name,
            task_timeout: Duration::ZERO,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Limit for each task wait; zero waits indefinitely
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Back up `server` under its own name with `description`.
    ///
    /// In [`BackupMode::Capture`] the vApp is powered on again whatever
    /// happened during the capture; the first error is returned.
    #[tracing::instrument(skip(self, server), fields(server = server.name()))]
    pub async fn backup_server(&self, server: &Server, description: &str, mode: BackupMode) -> Result<BackupOutcome> {
        let params = CaptureVAppParams::new(server.vapp().reference(), server.name(), description);

        let vdc = server.vdc()
            .cloned()
            .ok_or_else(|| InventoryError::MissingVdc(server.name().to_string()))?;

        if mode == BackupMode::Validate {
            info!("'{}' can be captured from VDC '{}'", server.name(), vdc.display_name());
            return Ok(BackupOutcome::Validated { params });
        }

        let captured = self.capture(server, &vdc, &params, description).await;
        if let Err(e) = &captured {
            error!("Backup of '{}' failed: {}", server.name(), e);
        }

        let powered_on = server.power_on(self.client, self.poll_interval).await;
        if let Err(e) = &powered_on {
            warn!("Could not power '{}' back on: {}", server.name(), e);
        }

        let outcome = captured?;
        powered_on?;
        Ok(outcome)
    }

    async fn capture(
        &self,
        server: &Server,
        vdc: &Reference,
        params: &CaptureVAppParams,
        description: &str,
    ) -> Result<BackupOutcome> {
        server.power_off(self.client, self.poll_interval).await?;

        let template = self.client.capture_vapp(vdc, params).await?;
        if let Some(task) = template.pending_task() {
            wait_for_task(self.client, task.clone(), self.task_timeout, self.poll_interval).await
                .map_err(|e| e.with_context(format!("Capture of '{}'", server.name())))?;
        }
        let template_ref = template.reference();
        info!("Captured '{}' as template {}", server.name(), template_ref.href);

        let catalog = self.find_catalog(server).await?;
        let item = CatalogItemParams::new(template_ref.clone(), server.name(), description);
        let catalog_item = self.client.add_catalog_item(&catalog, &item).await?;

        if let Some(task) = catalog_item.pending_task() {
            wait_for_task(self.client, task.clone(), self.task_timeout, self.poll_interval).await
                .map_err(|e| e.with_context(format!("Adding '{}' to catalog '{}'", server.name(), catalog.display_name())))?;
        }
        info!("Added '{}' to catalog '{}'", server.name(), catalog.display_name());

        Ok(BackupOutcome::Captured { template: template_ref, catalog })
    }

    async fn find_catalog(&self, server: &Server) -> Result<Reference> {
        let catalog_name = self.catalog_name
            .as_deref()
            .ok_or_else(|| InventoryError::config("No backup catalog configured (--catalog or VCLOUD_CATALOG)"))?;

        let org = self.client.organization(server.organization()).await?;
        org.catalog_named(catalog_name)
            .ok_or_else(|| InventoryError::CatalogNotFound {
                catalog: catalog_name.to_string(),
                organization: server.organization_name().to_string(),
            })
    }
}
