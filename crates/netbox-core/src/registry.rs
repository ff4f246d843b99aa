// ── Object-type registry ──
//
// The closed vocabulary of resource kinds the gateway accepts, and the
// NetBox collection path each one maps to. Adding a kind means adding a
// variant here and one arm in `collection_path`; nothing else changes.

use std::fmt::Write as _;
use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::CoreError;

/// Functional area of the NetBox data model. Also the first path segment
/// of every collection in that area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Domain {
    Dcim,
    Ipam,
    Circuits,
    Virtualization,
    Tenancy,
    Vpn,
    Wireless,
    Extras,
}

impl Domain {
    /// The REST path prefix (`dcim`, `ipam`, ...).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Dcim => "dcim",
            Self::Ipam => "ipam",
            Self::Circuits => "circuits",
            Self::Virtualization => "virtualization",
            Self::Tenancy => "tenancy",
            Self::Vpn => "vpn",
            Self::Wireless => "wireless",
            Self::Extras => "extras",
        }
    }

    /// Human-readable heading used when listing kinds.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dcim => "DCIM (Device and Infrastructure)",
            Self::Ipam => "IPAM (IP Address Management)",
            Self::Circuits => "Circuits",
            Self::Virtualization => "Virtualization",
            Self::Tenancy => "Tenancy",
            Self::Vpn => "VPN",
            Self::Wireless => "Wireless",
            Self::Extras => "Extras",
        }
    }
}

/// A NetBox resource kind, as callers name it.
///
/// The string form (`devices`, `ip-addresses`, ...) is what tools accept;
/// [`collection_path`](Self::collection_path) is what goes on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ObjectType {
    // ── DCIM ──
    Cables,
    ConsolePorts,
    ConsoleServerPorts,
    Devices,
    DeviceBays,
    DeviceRoles,
    DeviceTypes,
    FrontPorts,
    Interfaces,
    InventoryItems,
    Locations,
    Manufacturers,
    Modules,
    ModuleBays,
    ModuleTypes,
    Platforms,
    PowerFeeds,
    PowerOutlets,
    PowerPanels,
    PowerPorts,
    Racks,
    RackReservations,
    RackRoles,
    Regions,
    Sites,
    SiteGroups,
    VirtualChassis,

    // ── IPAM ──
    Asns,
    AsnRanges,
    Aggregates,
    FhrpGroups,
    IpAddresses,
    IpRanges,
    Prefixes,
    Rirs,
    Roles,
    RouteTargets,
    Services,
    Vlans,
    VlanGroups,
    Vrfs,

    // ── Circuits ──
    Circuits,
    CircuitTypes,
    CircuitTerminations,
    Providers,
    ProviderNetworks,

    // ── Virtualization ──
    Clusters,
    ClusterGroups,
    ClusterTypes,
    VirtualMachines,
    VmInterfaces,

    // ── Tenancy ──
    Tenants,
    TenantGroups,
    Contacts,
    ContactGroups,
    ContactRoles,

    // ── VPN ──
    IkePolicies,
    IkeProposals,
    IpsecPolicies,
    IpsecProfiles,
    IpsecProposals,
    #[strum(serialize = "l2vpns")]
    L2vpns,
    Tunnels,
    TunnelGroups,

    // ── Wireless ──
    WirelessLans,
    WirelessLanGroups,
    WirelessLinks,

    // ── Extras ──
    ConfigContexts,
    CustomFields,
    ExportTemplates,
    ImageAttachments,
    Jobs,
    SavedFilters,
    Scripts,
    Tags,
    Webhooks,
}

impl ObjectType {
    /// Look up a kind by the name callers use.
    ///
    /// Fails with [`CoreError::UnknownResourceKind`] carrying every valid
    /// name, sorted, so the caller can correct itself without another call.
    pub fn resolve(name: &str) -> Result<Self, CoreError> {
        Self::from_str(name).map_err(|_| CoreError::UnknownResourceKind {
            requested: name.to_owned(),
            valid: Self::sorted_names(),
        })
    }

    /// The caller-facing name, e.g. `ip-addresses`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Every valid kind name, sorted lexically.
    pub fn sorted_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Self::iter().map(Self::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn domain(self) -> Domain {
        match self {
            Self::Cables
            | Self::ConsolePorts
            | Self::ConsoleServerPorts
            | Self::Devices
            | Self::DeviceBays
            | Self::DeviceRoles
            | Self::DeviceTypes
            | Self::FrontPorts
            | Self::Interfaces
            | Self::InventoryItems
            | Self::Locations
            | Self::Manufacturers
            | Self::Modules
            | Self::ModuleBays
            | Self::ModuleTypes
            | Self::Platforms
            | Self::PowerFeeds
            | Self::PowerOutlets
            | Self::PowerPanels
            | Self::PowerPorts
            | Self::Racks
            | Self::RackReservations
            | Self::RackRoles
            | Self::Regions
            | Self::Sites
            | Self::SiteGroups
            | Self::VirtualChassis => Domain::Dcim,

            Self::Asns
            | Self::AsnRanges
            | Self::Aggregates
            | Self::FhrpGroups
            | Self::IpAddresses
            | Self::IpRanges
            | Self::Prefixes
            | Self::Rirs
            | Self::Roles
            | Self::RouteTargets
            | Self::Services
            | Self::Vlans
            | Self::VlanGroups
            | Self::Vrfs => Domain::Ipam,

            Self::Circuits
            | Self::CircuitTypes
            | Self::CircuitTerminations
            | Self::Providers
            | Self::ProviderNetworks => Domain::Circuits,

            Self::Clusters
            | Self::ClusterGroups
            | Self::ClusterTypes
            | Self::VirtualMachines
            | Self::VmInterfaces => Domain::Virtualization,

            Self::Tenants
            | Self::TenantGroups
            | Self::Contacts
            | Self::ContactGroups
            | Self::ContactRoles => Domain::Tenancy,

            Self::IkePolicies
            | Self::IkeProposals
            | Self::IpsecPolicies
            | Self::IpsecProfiles
            | Self::IpsecProposals
            | Self::L2vpns
            | Self::Tunnels
            | Self::TunnelGroups => Domain::Vpn,

            Self::WirelessLans | Self::WirelessLanGroups | Self::WirelessLinks => {
                Domain::Wireless
            }

            Self::ConfigContexts
            | Self::CustomFields
            | Self::ExportTemplates
            | Self::ImageAttachments
            | Self::Jobs
            | Self::SavedFilters
            | Self::Scripts
            | Self::Tags
            | Self::Webhooks => Domain::Extras,
        }
    }

    /// REST collection path relative to `/api/`, e.g. `dcim/devices`.
    pub fn collection_path(self) -> &'static str {
        match self {
            Self::Cables => "dcim/cables",
            Self::ConsolePorts => "dcim/console-ports",
            Self::ConsoleServerPorts => "dcim/console-server-ports",
            Self::Devices => "dcim/devices",
            Self::DeviceBays => "dcim/device-bays",
            Self::DeviceRoles => "dcim/device-roles",
            Self::DeviceTypes => "dcim/device-types",
            Self::FrontPorts => "dcim/front-ports",
            Self::Interfaces => "dcim/interfaces",
            Self::InventoryItems => "dcim/inventory-items",
            Self::Locations => "dcim/locations",
            Self::Manufacturers => "dcim/manufacturers",
            Self::Modules => "dcim/modules",
            Self::ModuleBays => "dcim/module-bays",
            Self::ModuleTypes => "dcim/module-types",
            Self::Platforms => "dcim/platforms",
            Self::PowerFeeds => "dcim/power-feeds",
            Self::PowerOutlets => "dcim/power-outlets",
            Self::PowerPanels => "dcim/power-panels",
            Self::PowerPorts => "dcim/power-ports",
            Self::Racks => "dcim/racks",
            Self::RackReservations => "dcim/rack-reservations",
            Self::RackRoles => "dcim/rack-roles",
            Self::Regions => "dcim/regions",
            Self::Sites => "dcim/sites",
            Self::SiteGroups => "dcim/site-groups",
            Self::VirtualChassis => "dcim/virtual-chassis",

            Self::Asns => "ipam/asns",
            Self::AsnRanges => "ipam/asn-ranges",
            Self::Aggregates => "ipam/aggregates",
            Self::FhrpGroups => "ipam/fhrp-groups",
            Self::IpAddresses => "ipam/ip-addresses",
            Self::IpRanges => "ipam/ip-ranges",
            Self::Prefixes => "ipam/prefixes",
            Self::Rirs => "ipam/rirs",
            Self::Roles => "ipam/roles",
            Self::RouteTargets => "ipam/route-targets",
            Self::Services => "ipam/services",
            Self::Vlans => "ipam/vlans",
            Self::VlanGroups => "ipam/vlan-groups",
            Self::Vrfs => "ipam/vrfs",

            Self::Circuits => "circuits/circuits",
            Self::CircuitTypes => "circuits/circuit-types",
            Self::CircuitTerminations => "circuits/circuit-terminations",
            Self::Providers => "circuits/providers",
            Self::ProviderNetworks => "circuits/provider-networks",

            Self::Clusters => "virtualization/clusters",
            Self::ClusterGroups => "virtualization/cluster-groups",
            Self::ClusterTypes => "virtualization/cluster-types",
            Self::VirtualMachines => "virtualization/virtual-machines",
            // VM interfaces live under their own collection, not `vm-interfaces`.
            Self::VmInterfaces => "virtualization/interfaces",

            Self::Tenants => "tenancy/tenants",
            Self::TenantGroups => "tenancy/tenant-groups",
            Self::Contacts => "tenancy/contacts",
            Self::ContactGroups => "tenancy/contact-groups",
            Self::ContactRoles => "tenancy/contact-roles",

            Self::IkePolicies => "vpn/ike-policies",
            Self::IkeProposals => "vpn/ike-proposals",
            Self::IpsecPolicies => "vpn/ipsec-policies",
            Self::IpsecProfiles => "vpn/ipsec-profiles",
            Self::IpsecProposals => "vpn/ipsec-proposals",
            Self::L2vpns => "vpn/l2vpns",
            Self::Tunnels => "vpn/tunnels",
            Self::TunnelGroups => "vpn/tunnel-groups",

            Self::WirelessLans => "wireless/wireless-lans",
            Self::WirelessLanGroups => "wireless/wireless-lan-groups",
            Self::WirelessLinks => "wireless/wireless-links",

            Self::ConfigContexts => "extras/config-contexts",
            Self::CustomFields => "extras/custom-fields",
            Self::ExportTemplates => "extras/export-templates",
            Self::ImageAttachments => "extras/image-attachments",
            Self::Jobs => "extras/jobs",
            Self::SavedFilters => "extras/saved-filters",
            Self::Scripts => "extras/scripts",
            Self::Tags => "extras/tags",
            Self::Webhooks => "extras/webhooks",
        }
    }

    /// Path of a single object: `{collection}/{id}`.
    pub fn object_path(self, id: crate::ObjectId) -> String {
        format!("{}/{id}", self.collection_path())
    }

    /// All kinds grouped under their domain heading, one `- name` per line.
    ///
    /// Rendered into tool descriptions so an agent sees the vocabulary up
    /// front.
    pub fn catalog() -> String {
        let mut out = String::new();
        for domain in Domain::iter() {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "{}:", domain.label());
            for kind in Self::iter().filter(|k| k.domain() == domain) {
                let _ = writeln!(out, "- {kind}");
            }
        }
        out
    }
}
