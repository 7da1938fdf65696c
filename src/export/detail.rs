use crate::config::Template;
use crate::inventory::{base_memory_gb, Server};

/// Disks covered by the base template; anything past these is extra storage
pub const DEFAULT_DRIVE_COUNT: usize = 2;

/// Header cells of the exported sheet, in column order
pub const COLUMN_HEADERS: [&str; 14] = [
    "Data Center",
    "CPUs",
    "Memory",
    "Extra Storage",
    "Extra Memory",
    "Environment",
    "IP Address",
    "DNS Name",
    "Hash",
    "Organization",
    "vAPP Name",
    "VM Description",
    "Template",
    "Zone",
];

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

/// One exported row, computed from a server's first VM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDetail {
    pub data_center: String,
    pub cpus: u32,
    pub memory: String,
    pub extra_storage: String,
    pub extra_memory: String,
    pub environment: String,
    pub ip_address: String,
    pub dns_name: String,
    pub hash: String,
    pub organization: String,
    pub vapp_name: String,
    pub vm_description: String,
    pub template: String,
    pub zone: String,
}

impl ServerDetail {
    /// Compute the row for `server`, or `None` when the vApp has no VMs.
    pub fn from_server(server: &Server, templates: &[Template]) -> Option<Self> {
        let vm = server.primary_vm()?;
        let cpus = vm.cpu_count();
        let memory_mb = vm.memory_mb() as i64;

        let extra_storage_mb: u64 = vm.hard_disks()
            .iter()
            .skip(DEFAULT_DRIVE_COUNT)
            .map(|disk| disk.capacity_mb)
            .sum();

        let base_memory_mb = i64::from(base_memory_gb(cpus, templates)) * 1024;
        let extra_memory_mb = if base_memory_mb != memory_mb {
            memory_mb - base_memory_mb
        } else {
            0
        };

        let primary_nic = vm.primary_network_card();
        let organization = server.organization_name().to_string();
        let zone = primary_nic
            .as_ref()
            .map(|nic| nic.network.replace(&format!("{organization}-"), ""))
            .unwrap_or_default();

        Some(Self {
            data_center: capitalize(server.data_center()),
            cpus,
            memory: gigabytes(memory_mb),
            extra_storage: gigabytes(extra_storage_mb as i64),
            extra_memory: gigabytes(extra_memory_mb),
            environment: server.environment().to_string(),
            ip_address: primary_nic.and_then(|nic| nic.ip_address).unwrap_or_default(),
            dns_name: vm.computer_name().unwrap_or_default().to_uppercase(),
            hash: "#".to_string(),
            organization,
            vapp_name: server.vapp().name.clone(),
            vm_description: String::new(),
            template: String::new(),
            zone,
        })
    }

    /// Cells in the order of [`COLUMN_HEADERS`]
    pub fn cells(&self) -> [Cell<'_>; 14] {
        [
            Cell::Text(&self.data_center),
            Cell::Number(f64::from(self.cpus)),
            Cell::Text(&self.memory),
            Cell::Text(&self.extra_storage),
            Cell::Text(&self.extra_memory),
            Cell::Text(&self.environment),
            Cell::Text(&self.ip_address),
            Cell::Text(&self.dns_name),
            Cell::Text(&self.hash),
            Cell::Text(&self.organization),
            Cell::Text(&self.vapp_name),
            Cell::Text(&self.vm_description),
            Cell::Text(&self.template),
            Cell::Text(&self.zone),
        ]
    }
}

// Truncating division, so -1536 MB reads as "-1GB".
fn gigabytes(megabytes: i64) -> String {
    format!("{}GB", megabytes / 1024)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
