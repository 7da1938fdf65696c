use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::info;

use crate::config::{EnvironmentRule, SortKey};
use crate::error::Result;
use crate::inventory::classify::{classify, EnvironmentTier};
use crate::vcloud::{wait_for_task, Client, PowerAction, Reference, VApp, Vm};

/// One vApp found in the hierarchy, with its classification
#[derive(Debug, Clone)]
pub struct Server {
    organization: Reference,
    vdc: Option<Reference>,
    name: String,
    vapp: VApp,
    data_center: String,
    environment: EnvironmentTier,
}

/// Flat view of a server for listings
#[derive(Debug, Clone, Serialize)]
pub struct ServerSummary {
    pub name: String,
    pub environment: EnvironmentTier,
    pub organization: String,
    pub vdc: Option<String>,
    pub data_center: String,
    pub vm_count: usize,
    pub cpus: u32,
    pub memory_mb: u64,
    pub ip_address: Option<String>,
}

impl ServerSummary {
    /// Memory of the first VM in bytes, saturating on absurd sizes
    pub fn memory_bytes(&self) -> u64 {
        self.memory_mb.saturating_mul(1024 * 1024)
    }
}

impl Server {
    /// Build a server record; the environment is classified from `name`.
    pub fn new(
        organization: Reference,
        vdc: Option<Reference>,
        name: impl Into<String>,
        vapp: VApp,
        data_center: impl Into<String>,
        rules: &[EnvironmentRule],
    ) -> Self {
        let name = name.into();
        let environment = classify(&name, rules);
        Self {
            organization,
            vdc,
            name,
            vapp,
            data_center: data_center.into(),
            environment,
        }
    }

    pub fn organization(&self) -> &Reference {
        &self.organization
    }

    pub fn organization_name(&self) -> &str {
        self.organization.display_name()
    }

    pub fn vdc(&self) -> Option<&Reference> {
        self.vdc.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vapp(&self) -> &VApp {
        &self.vapp
    }

    pub fn data_center(&self) -> &str {
        &self.data_center
    }

    pub fn environment(&self) -> EnvironmentTier {
        self.environment
    }

    /// The first VM of the vApp, which carries the reported hardware
    pub fn primary_vm(&self) -> Option<&Vm> {
        self.vapp.vms().first()
    }

    pub fn summary(&self) -> ServerSummary {
        let vm = self.primary_vm();
        ServerSummary {
            name: self.name.clone(),
            environment: self.environment,
            organization: self.organization_name().to_string(),
            vdc: self.vdc.as_ref().map(|vdc| vdc.display_name().to_string()),
            data_center: self.data_center.clone(),
            vm_count: self.vapp.vms().len(),
            cpus: vm.map(Vm::cpu_count).unwrap_or(0),
            memory_mb: vm.map(Vm::memory_mb).unwrap_or(0),
            ip_address: vm
                .and_then(Vm::primary_network_card)
                .and_then(|card| card.ip_address),
        }
    }

    /// Power the vApp off and wait for the task to finish
    pub async fn power_off<C>(&self, client: &C, poll_interval: Duration) -> Result<()>
    where
        C: Client + Sync + ?Sized,
    {
        self.power(client, PowerAction::PowerOff, poll_interval).await
    }

    /// Power the vApp on and wait for the task to finish
    pub async fn power_on<C>(&self, client: &C, poll_interval: Duration) -> Result<()>
    where
        C: Client + Sync + ?Sized,
    {
        self.power(client, PowerAction::PowerOn, poll_interval).await
    }

    async fn power<C>(&self, client: &C, action: PowerAction, poll_interval: Duration) -> Result<()>
    where
        C: Client + Sync + ?Sized,
    {
        info!("{:?} {}", action, self.name);
        let task = client.power_action(&self.vapp.reference(), action).await?;
        wait_for_task(client, task, Duration::ZERO, poll_interval).await?;
        Ok(())
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Order servers in place
pub fn sort_servers(servers: &mut [Server], key: SortKey) {
    match key {
        SortKey::None => {}
        SortKey::Name => servers.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Environment => {
            servers.sort_by(|a, b| a.environment.cmp(&b.environment).then_with(|| a.name.cmp(&b.name)))
        }
    }
}
