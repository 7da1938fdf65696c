//! vCloud API resource documents
//!
//! Only the attributes and elements the inventory reads are mapped. The
//! deserializer matches local names, so `ovf:`, `rasd:` and `vcloud:`
//! prefixes do not appear in the renames below.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::vcloud::error::RequestError;

/// Namespace of the vCloud 1.5 schema, required on request bodies.
pub const VCLOUD_NAMESPACE: &str = "http://www.vmware.com/vcloud/v1.5";

pub mod media_type {
    pub const ORG: &str = "application/vnd.vmware.vcloud.org+xml";
    pub const VDC: &str = "application/vnd.vmware.vcloud.vdc+xml";
    pub const VAPP: &str = "application/vnd.vmware.vcloud.vApp+xml";
    pub const CATALOG: &str = "application/vnd.vmware.vcloud.catalog+xml";
    pub const CAPTURE_VAPP_PARAMS: &str = "application/vnd.vmware.vcloud.captureVAppParams+xml";
    pub const CATALOG_ITEM: &str = "application/vnd.vmware.vcloud.catalogItem+xml";
}

/// RASD resource type numbers used in `VirtualHardwareSection` items.
pub mod resource_type {
    pub const CPU: u32 = 3;
    pub const MEMORY: u32 = 4;
    pub const NETWORK_ADAPTER: u32 = 10;
    pub const HARD_DISK: u32 = 17;
}

pub fn from_xml<T: DeserializeOwned>(xml: &str) -> Result<T, RequestError> {
    quick_xml::de::from_str(xml).map_err(RequestError::XmlDeserialization)
}

pub fn to_xml<T: Serialize>(value: &T) -> Result<String, RequestError> {
    quick_xml::se::to_string(value).map_err(RequestError::XmlSerialization)
}

/// A pointer to another API resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "@href")]
    pub href: String,
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Reference {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            name: None,
            media_type: None,
        }
    }

    pub fn named(href: impl Into<String>, name: impl Into<String>, media_type: &str) -> Self {
        Self {
            href: href.into(),
            name: Some(name.into()),
            media_type: Some(media_type.to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.href)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    #[serde(rename = "@rel")]
    pub rel: String,
    #[serde(rename = "@href")]
    pub href: String,
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "@type", default)]
    pub media_type: Option<String>,
}

impl Link {
    fn to_reference(&self) -> Reference {
        Reference {
            href: self.href.clone(),
            name: self.name.clone(),
            media_type: self.media_type.clone(),
        }
    }
}

fn links_of_type(links: &[Link], media_type: &str) -> Vec<Reference> {
    links.iter()
        .filter(|link| link.rel == "down" && link.media_type.as_deref() == Some(media_type))
        .map(Link::to_reference)
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(rename = "@user", default)]
    pub user: String,
    #[serde(rename = "@org", default)]
    pub org: String,
    #[serde(rename = "Link", default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrgList {
    #[serde(rename = "Org", default)]
    pub orgs: Vec<Reference>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Org {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@href")]
    pub href: String,
    #[serde(rename = "Link", default)]
    pub links: Vec<Link>,
}

impl Org {
    pub fn reference(&self) -> Reference {
        Reference::named(&self.href, &self.name, media_type::ORG)
    }

    pub fn vdc_refs(&self) -> Vec<Reference> {
        links_of_type(&self.links, media_type::VDC)
    }

    pub fn catalog_refs(&self) -> Vec<Reference> {
        links_of_type(&self.links, media_type::CATALOG)
    }

    pub fn catalog_named(&self, name: &str) -> Option<Reference> {
        self.catalog_refs()
            .into_iter()
            .find(|catalog| catalog.name.as_deref() == Some(name))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vdc {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@href")]
    pub href: String,
    #[serde(rename = "ResourceEntities", default)]
    pub resource_entities: Option<ResourceEntities>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceEntities {
    #[serde(rename = "ResourceEntity", default)]
    pub entities: Vec<Reference>,
}

impl Vdc {
    pub fn reference(&self) -> Reference {
        Reference::named(&self.href, &self.name, media_type::VDC)
    }

    pub fn vapp_refs(&self) -> Vec<Reference> {
        self.resource_entities
            .as_ref()
            .map(|entities| {
                entities.entities.iter()
                    .filter(|entity| entity.media_type.as_deref() == Some(media_type::VAPP))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VApp {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@href")]
    pub href: String,
    #[serde(rename = "@status", default)]
    pub status: Option<i32>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Children", default)]
    pub children: Option<Children>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Children {
    #[serde(rename = "Vm", default)]
    pub vms: Vec<Vm>,
}

impl VApp {
    pub fn reference(&self) -> Reference {
        Reference::named(&self.href, &self.name, media_type::VAPP)
    }

    pub fn vms(&self) -> &[Vm] {
        self.children
            .as_ref()
            .map(|children| children.vms.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vm {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@href")]
    pub href: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "VirtualHardwareSection", default)]
    pub hardware: Option<VirtualHardwareSection>,
    #[serde(rename = "GuestCustomizationSection", default)]
    pub guest_customization: Option<GuestCustomizationSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VirtualHardwareSection {
    #[serde(rename = "Item", default)]
    pub items: Vec<RasdItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RasdItem {
    #[serde(rename = "ResourceType")]
    pub resource_type: String,
    #[serde(rename = "ElementName", default)]
    pub element_name: Option<String>,
    #[serde(rename = "VirtualQuantity", default)]
    pub virtual_quantity: Option<String>,
    #[serde(rename = "HostResource", default)]
    pub host_resource: Option<HostResource>,
    #[serde(rename = "Connection", default)]
    pub connection: Option<Connection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostResource {
    #[serde(rename = "@capacity", default)]
    pub capacity: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Connection {
    #[serde(rename = "@ipAddress", default)]
    pub ip_address: Option<String>,
    #[serde(rename = "@primaryNetworkConnection", default)]
    pub primary: bool,
    #[serde(rename = "$text", default)]
    pub network: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestCustomizationSection {
    #[serde(rename = "ComputerName", default)]
    pub computer_name: Option<String>,
}

impl RasdItem {
    fn resource_type(&self) -> Option<u32> {
        self.resource_type.trim().parse().ok()
    }

    fn quantity(&self) -> Option<u64> {
        self.virtual_quantity.as_deref()?.trim().parse().ok()
    }
}

/// A hard disk attached to a VM, sized in MB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualDisk {
    pub name: String,
    pub capacity_mb: u64,
}

/// A network card attached to a VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkCard {
    pub network: String,
    pub ip_address: Option<String>,
    pub primary: bool,
}

impl Vm {
    fn items(&self, kind: u32) -> impl Iterator<Item = &RasdItem> {
        self.hardware
            .iter()
            .flat_map(|hardware| hardware.items.iter())
            .filter(move |item| item.resource_type() == Some(kind))
    }

    pub fn cpu_count(&self) -> u32 {
        self.items(resource_type::CPU)
            .find_map(RasdItem::quantity)
            .map(|count| u32::try_from(count).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    pub fn memory_mb(&self) -> u64 {
        self.items(resource_type::MEMORY)
            .find_map(RasdItem::quantity)
            .unwrap_or(0)
    }

    /// Hard disks in hardware-section order.
    pub fn hard_disks(&self) -> Vec<VirtualDisk> {
        self.items(resource_type::HARD_DISK)
            .map(|item| VirtualDisk {
                name: item.element_name.clone().unwrap_or_default(),
                capacity_mb: item.host_resource
                    .as_ref()
                    .and_then(|host| host.capacity.as_deref())
                    .and_then(|capacity| capacity.trim().parse().ok())
                    .unwrap_or(0),
            })
            .collect()
    }

    pub fn network_cards(&self) -> Vec<NetworkCard> {
        self.items(resource_type::NETWORK_ADAPTER)
            .filter_map(|item| item.connection.as_ref())
            .map(|connection| NetworkCard {
                network: connection.network.trim().to_string(),
                ip_address: connection.ip_address.clone(),
                primary: connection.primary,
            })
            .collect()
    }

    /// The card flagged as primary, falling back to the first card.
    pub fn primary_network_card(&self) -> Option<NetworkCard> {
        let cards = self.network_cards();
        cards.iter()
            .find(|card| card.primary)
            .or_else(|| cards.first())
            .cloned()
    }

    pub fn computer_name(&self) -> Option<&str> {
        self.guest_customization
            .as_ref()
            .and_then(|guest| guest.computer_name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Queued,
    PreRunning,
    Running,
    Success,
    Error,
    Canceled,
    Aborted,
    Other(String),
}

impl TaskState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Success | Self::Error | Self::Canceled | Self::Aborted)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    #[serde(rename = "@href")]
    pub href: String,
    #[serde(rename = "@status")]
    pub status: String,
    #[serde(rename = "@operationName", default)]
    pub operation_name: Option<String>,
    #[serde(rename = "@operation", default)]
    pub operation: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<TaskError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskError {
    #[serde(rename = "@message", default)]
    pub message: String,
}

impl Task {
    pub fn state(&self) -> TaskState {
        match self.status.as_str() {
            "queued" => TaskState::Queued,
            "preRunning" => TaskState::PreRunning,
            "running" => TaskState::Running,
            "success" => TaskState::Success,
            "error" => TaskState::Error,
            "canceled" => TaskState::Canceled,
            "aborted" => TaskState::Aborted,
            other => TaskState::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        self.operation_name
            .as_deref()
            .or(self.operation.as_deref())
            .unwrap_or(&self.href)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tasks {
    #[serde(rename = "Task", default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VAppTemplate {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@href")]
    pub href: String,
    #[serde(rename = "Tasks", default)]
    pub tasks: Option<Tasks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@href", default)]
    pub href: Option<String>,
    #[serde(rename = "Tasks", default)]
    pub tasks: Option<Tasks>,
}

fn first_task(tasks: &Option<Tasks>) -> Option<&Task> {
    tasks.as_ref().and_then(|tasks| tasks.tasks.first())
}

impl VAppTemplate {
    pub fn reference(&self) -> Reference {
        Reference::new(&self.href)
    }

    pub fn pending_task(&self) -> Option<&Task> {
        first_task(&self.tasks)
    }
}

impl CatalogItem {
    pub fn pending_task(&self) -> Option<&Task> {
        first_task(&self.tasks)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "CaptureVAppParams")]
pub struct CaptureVAppParams {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Source")]
    pub source: Reference,
}

impl CaptureVAppParams {
    pub fn new(source: Reference, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            xmlns: VCLOUD_NAMESPACE,
            name: name.into(),
            description: description.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "CatalogItem")]
pub struct CatalogItemParams {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Entity")]
    pub entity: Reference,
}

impl CatalogItemParams {
    pub fn new(entity: Reference, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            xmlns: VCLOUD_NAMESPACE,
            name: name.into(),
            description: description.into(),
            entity,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const ORG_LIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OrgList xmlns="http://www.vmware.com/vcloud/v1.5" href="https://vcd.example.com/api/org/" type="application/vnd.vmware.vcloud.orgList+xml">
    <Org href="https://vcd.example.com/api/org/b2" name="Zeta" type="application/vnd.vmware.vcloud.org+xml"/>
    <Org href="https://vcd.example.com/api/org/a1" name="Acme" type="application/vnd.vmware.vcloud.org+xml"/>
</OrgList>"#;

    pub const ORG_ACME: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Org xmlns="http://www.vmware.com/vcloud/v1.5" name="Acme" href="https://vcd.example.com/api/org/a1" type="application/vnd.vmware.vcloud.org+xml">
    <Link rel="down" href="https://vcd.example.com/api/vdc/v1" name="Acme-VDC" type="application/vnd.vmware.vcloud.vdc+xml"/>
    <Link rel="down" href="https://vcd.example.com/api/catalog/c1" name="Backups" type="application/vnd.vmware.vcloud.catalog+xml"/>
    <Link rel="down" href="https://vcd.example.com/api/catalog/c2" name="Public" type="application/vnd.vmware.vcloud.catalog+xml"/>
    <Link rel="down" href="https://vcd.example.com/api/network/n1" name="Acme-DMZ" type="application/vnd.vmware.vcloud.orgNetwork+xml"/>
    <Description>Acme tenant</Description>
    <FullName>Acme Corporation</FullName>
</Org>"#;

    pub const ORG_ZETA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Org xmlns="http://www.vmware.com/vcloud/v1.5" name="Zeta" href="https://vcd.example.com/api/org/b2" type="application/vnd.vmware.vcloud.org+xml">
    <Link rel="down" href="https://vcd.example.com/api/vdc/v2" name="Zeta-VDC" type="application/vnd.vmware.vcloud.vdc+xml"/>
    <FullName>Zeta</FullName>
</Org>"#;

    pub const VDC_ACME: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Vdc xmlns="http://www.vmware.com/vcloud/v1.5" status="1" name="Acme-VDC" href="https://vcd.example.com/api/vdc/v1" type="application/vnd.vmware.vcloud.vdc+xml">
    <Link rel="up" href="https://vcd.example.com/api/org/a1" type="application/vnd.vmware.vcloud.org+xml"/>
    <AllocationModel>AllocationPool</AllocationModel>
    <ResourceEntities>
        <ResourceEntity href="https://vcd.example.com/api/vApp/vapp-1" name="web-P01" type="application/vnd.vmware.vcloud.vApp+xml"/>
        <ResourceEntity href="https://vcd.example.com/api/vAppTemplate/vappTemplate-9" name="base-image" type="application/vnd.vmware.vcloud.vAppTemplate+xml"/>
        <ResourceEntity href="https://vcd.example.com/api/vApp/vapp-2" name="db-D01" type="application/vnd.vmware.vcloud.vApp+xml"/>
    </ResourceEntities>
</Vdc>"#;

    pub const VDC_ZETA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Vdc xmlns="http://www.vmware.com/vcloud/v1.5" status="1" name="Zeta-VDC" href="https://vcd.example.com/api/vdc/v2" type="application/vnd.vmware.vcloud.vdc+xml">
    <AllocationModel>AllocationVApp</AllocationModel>
    <ResourceEntities>
        <ResourceEntity href="https://vcd.example.com/api/vApp/vapp-3" name="app-S01" type="application/vnd.vmware.vcloud.vApp+xml"/>
    </ResourceEntities>
</Vdc>"#;

    /// A vApp with one VM: 2 CPUs, 6 GB memory, four disks and two NICs.
    pub fn vapp(name: &str, href: &str) -> String {
        format!(r#"<?xml version="1.0" encoding="UTF-8"?>
<VApp xmlns="http://www.vmware.com/vcloud/v1.5" xmlns:ovf="http://schemas.dmtf.org/ovf/envelope/1" xmlns:rasd="http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_ResourceAllocationSettingData" xmlns:vcloud="http://www.vmware.com/vcloud/v1.5" status="4" name="{name}" href="{href}" type="application/vnd.vmware.vcloud.vApp+xml">
    <Link rel="power:powerOff" href="{href}/power/action/powerOff"/>
    <Description>Application tier</Description>
    <Children>
        <Vm status="4" name="{name}-vm" href="https://vcd.example.com/api/vApp/vm-{name}" type="application/vnd.vmware.vcloud.vm+xml">
            <Description>primary node</Description>
            <ovf:VirtualHardwareSection ovf:transport="">
                <ovf:Info>Virtual hardware requirements</ovf:Info>
                <ovf:System>
                    <vssd:ElementName xmlns:vssd="http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_VirtualSystemSettingData">Virtual Hardware Family</vssd:ElementName>
                </ovf:System>
                <ovf:Item>
                    <rasd:Address>00:50:56:01:01:01</rasd:Address>
                    <rasd:AddressOnParent>0</rasd:AddressOnParent>
                    <rasd:AutomaticAllocation>true</rasd:AutomaticAllocation>
                    <rasd:Connection vcloud:ipAddressingMode="POOL" vcloud:ipAddress="10.1.0.10" vcloud:primaryNetworkConnection="false">Acme-Backend</rasd:Connection>
                    <rasd:ElementName>Network adapter 0</rasd:ElementName>
                    <rasd:InstanceID>1</rasd:InstanceID>
                    <rasd:ResourceType>10</rasd:ResourceType>
                </ovf:Item>
                <ovf:Item>
                    <rasd:Address>00:50:56:01:01:02</rasd:Address>
                    <rasd:AddressOnParent>1</rasd:AddressOnParent>
                    <rasd:Connection vcloud:ipAddressingMode="POOL" vcloud:ipAddress="10.2.0.20" vcloud:primaryNetworkConnection="true">Acme-DMZ</rasd:Connection>
                    <rasd:ElementName>Network adapter 1</rasd:ElementName>
                    <rasd:InstanceID>2</rasd:InstanceID>
                    <rasd:ResourceType>10</rasd:ResourceType>
                </ovf:Item>
                <ovf:Item>
                    <rasd:Address>0</rasd:Address>
                    <rasd:ElementName>SCSI Controller 0</rasd:ElementName>
                    <rasd:InstanceID>3</rasd:InstanceID>
                    <rasd:ResourceSubType>lsilogic</rasd:ResourceSubType>
                    <rasd:ResourceType>6</rasd:ResourceType>
                </ovf:Item>
                <ovf:Item>
                    <rasd:AddressOnParent>0</rasd:AddressOnParent>
                    <rasd:ElementName>Hard disk 1</rasd:ElementName>
                    <rasd:HostResource vcloud:capacity="40960" vcloud:busSubType="lsilogic" vcloud:busType="6"></rasd:HostResource>
                    <rasd:InstanceID>2000</rasd:InstanceID>
                    <rasd:ResourceType>17</rasd:ResourceType>
                </ovf:Item>
                <ovf:Item>
                    <rasd:AddressOnParent>1</rasd:AddressOnParent>
                    <rasd:ElementName>Hard disk 2</rasd:ElementName>
                    <rasd:HostResource vcloud:capacity="20480" vcloud:busSubType="lsilogic" vcloud:busType="6"></rasd:HostResource>
                    <rasd:InstanceID>2001</rasd:InstanceID>
                    <rasd:ResourceType>17</rasd:ResourceType>
                </ovf:Item>
                <ovf:Item>
                    <rasd:AddressOnParent>2</rasd:AddressOnParent>
                    <rasd:ElementName>Hard disk 3</rasd:ElementName>
                    <rasd:HostResource vcloud:capacity="102400" vcloud:busSubType="lsilogic" vcloud:busType="6"></rasd:HostResource>
                    <rasd:InstanceID>2002</rasd:InstanceID>
                    <rasd:ResourceType>17</rasd:ResourceType>
                </ovf:Item>
                <ovf:Item>
                    <rasd:AddressOnParent>3</rasd:AddressOnParent>
                    <rasd:ElementName>Hard disk 4</rasd:ElementName>
                    <rasd:HostResource vcloud:capacity="51200" vcloud:busSubType="lsilogic" vcloud:busType="6"></rasd:HostResource>
                    <rasd:InstanceID>2003</rasd:InstanceID>
                    <rasd:ResourceType>17</rasd:ResourceType>
                </ovf:Item>
                <ovf:Item>
                    <rasd:AllocationUnits>hertz * 10^6</rasd:AllocationUnits>
                    <rasd:Description>Number of Virtual CPUs</rasd:Description>
                    <rasd:ElementName>2 virtual CPU(s)</rasd:ElementName>
                    <rasd:InstanceID>4</rasd:InstanceID>
                    <rasd:Reservation>0</rasd:Reservation>
                    <rasd:ResourceType>3</rasd:ResourceType>
                    <rasd:VirtualQuantity>2</rasd:VirtualQuantity>
                </ovf:Item>
                <ovf:Item>
                    <rasd:AllocationUnits>byte * 2^20</rasd:AllocationUnits>
                    <rasd:Description>Memory Size</rasd:Description>
                    <rasd:ElementName>6144 MB of memory</rasd:ElementName>
                    <rasd:InstanceID>5</rasd:InstanceID>
                    <rasd:ResourceType>4</rasd:ResourceType>
                    <rasd:VirtualQuantity>6144</rasd:VirtualQuantity>
                </ovf:Item>
            </ovf:VirtualHardwareSection>
            <GuestCustomizationSection ovf:required="false">
                <ovf:Info>Specifies Guest OS Customization Settings</ovf:Info>
                <Enabled>true</Enabled>
                <ComputerName>{name}-host</ComputerName>
            </GuestCustomizationSection>
        </Vm>
    </Children>
</VApp>"#)
    }

    pub fn task(href: &str, status: &str) -> String {
        format!(r#"<?xml version="1.0" encoding="UTF-8"?>
<Task xmlns="http://www.vmware.com/vcloud/v1.5" status="{status}" operationName="vappPowerOff" operation="Stopping vApp" href="{href}" type="application/vnd.vmware.vcloud.task+xml">
    <Owner href="https://vcd.example.com/api/vApp/vapp-1" name="web-P01" type="application/vnd.vmware.vcloud.vApp+xml"/>
</Task>"#)
    }
}
