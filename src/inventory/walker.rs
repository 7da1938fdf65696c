use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::EnvironmentRule;
use crate::error::{InventoryError, Result};
use crate::inventory::server::Server;
use crate::progress::ProgressReporter;
use crate::vcloud::{Client, Reference};

/// Walks organization → VDC → vApp and builds one [`Server`] per vApp
pub struct InventoryWalker {
    data_center: String,
    rules: Vec<EnvironmentRule>,
    progress: Option<Arc<ProgressReporter>>,
}

impl InventoryWalker {
    pub fn new(data_center: impl Into<String>, rules: Vec<EnvironmentRule>) -> Self {
        Self {
            data_center: data_center.into(),
            rules,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: Arc<ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Collect every vApp visible to the session.
    ///
    /// Organizations without a name are skipped, the rest are visited in name
    /// order. VDCs and vApps keep the order the API returns them in.
    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn walk<C>(&self, client: &C) -> Result<Vec<Server>>
    where
        C: Client + Sync + ?Sized,
    {
        let mut servers = Vec::new();

        for org_ref in sorted_organizations(client.org_refs().await?) {
            let org_name = org_ref.display_name().to_string();
            self.report(|progress| progress.organization(&org_name));

            let org = client.organization(&org_ref).await
                .map_err(|e| e.with_context(format!("Failed to fetch organization '{org_name}'")))?;

            for vdc_ref in org.vdc_refs() {
                self.report(|progress| progress.vdc(vdc_ref.display_name()));

                let vdc = client.vdc(&vdc_ref).await
                    .map_err(|e| e.with_context(format!("Failed to fetch VDC '{}'", vdc_ref.display_name())))?;

                let vapp_refs = vdc.vapp_refs();
                debug!("VDC '{}' holds {} vApp(s)", vdc_ref.display_name(), vapp_refs.len());

                for vapp_ref in vapp_refs {
                    let vapp = client.vapp(&vapp_ref).await
                        .map_err(|e| e.with_context(format!("Failed to fetch vApp '{}'", vapp_ref.display_name())))?;

                    let name = vapp_ref.name.clone().unwrap_or_else(|| vapp.name.clone());
                    self.report(|progress| progress.server(&name));

                    servers.push(Server::new(
                        org_ref.clone(),
                        Some(vdc_ref.clone()),
                        name,
                        vapp,
                        self.data_center.as_str(),
                        &self.rules,
                    ));
                }
            }
        }

        info!("Inventory walk found {} vApp(s)", servers.len());
        Ok(servers)
    }

    /// Walk the inventory and return the first vApp called `name`
    pub async fn find_server<C>(&self, client: &C, name: &str) -> Result<Server>
    where
        C: Client + Sync + ?Sized,
    {
        self.walk(client).await?
            .into_iter()
            .find(|server| server.name() == name)
            .ok_or_else(|| InventoryError::ServerNotFound(name.to_string()))
    }

    fn report(&self, f: impl FnOnce(&ProgressReporter)) {
        if let Some(progress) = &self.progress {
            f(progress);
        }
    }
}

fn sorted_organizations(orgs: Vec<Reference>) -> Vec<Reference> {
    let mut named: Vec<Reference> = orgs.into_iter()
        .filter(|org| {
            let has_name = org.name.as_deref().is_some_and(|name| !name.is_empty());
            if !has_name {
                warn!("Skipping organization without a name: {}", org.href);
            }
            has_name
        })
        .collect();
    named.sort_by(|a, b| a.name.cmp(&b.name));
    named
}
