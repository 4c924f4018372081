// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The `/project/masterdevicelist` body.

use serde::{Deserialize, Serialize};

use crate::href::id_from_href;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ipv4Properties {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "IP", skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(rename = "SubnetMask", skip_serializing_if = "Option::is_none")]
    pub subnet_mask: Option<String>,
    #[serde(rename = "Gateway", skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(rename = "DNS1", skip_serializing_if = "Option::is_none")]
    pub dns1: Option<String>,
    #[serde(rename = "DNS2", skip_serializing_if = "Option::is_none")]
    pub dns2: Option<String>,
    #[serde(rename = "DNS3", skip_serializing_if = "Option::is_none")]
    pub dns3: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ipv6Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_local_unicast_addresses: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ipl {
    #[serde(rename = "ProcessorID", skip_serializing_if = "Option::is_none")]
    pub processor_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorNetworkInterface {
    #[serde(rename = "MACAddress", skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(rename = "IPv4Properties", skip_serializing_if = "Option::is_none")]
    pub ipv4_properties: Option<Ipv4Properties>,
    #[serde(rename = "IPv6Properties", skip_serializing_if = "Option::is_none")]
    pub ipv6_properties: Option<Ipv6Properties>,
}

/// One processor entry of the master device list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessorDevice {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_interfaces: Option<Vec<ProcessorNetworkInterface>>,
    #[serde(rename = "IPL", skip_serializing_if = "Option::is_none")]
    pub ipl: Option<Ipl>,
}

impl ProcessorDevice {
    /// Device id named by the entry's href.
    pub fn id(&self) -> Option<u32> {
        id_from_href(&self.href)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedWhiteList {
    #[serde(rename = "JWT", skip_serializing_if = "Option::is_none")]
    pub jwt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MasterDeviceList {
    #[serde(default)]
    pub devices: Vec<ProcessorDevice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_white_list: Option<SignedWhiteList>,
}

/// Body of `OneMasterDeviceListDefinition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneMasterDeviceListBody {
    pub master_device_list: MasterDeviceList,
}
