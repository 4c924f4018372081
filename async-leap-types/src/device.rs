// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Device definition and status bodies.

use serde::{Deserialize, Serialize};

use crate::enums::{Availability, BatteryState};
use crate::href::{id_from_href, HRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatteryStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_state: Option<BatteryState>,
}

/// Counter of failed firmware or database transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transfers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// One entry of a device status body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceStatus {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_status: Option<BatteryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_transfers: Option<Transfers>,
}

impl DeviceStatus {
    /// Device id named by the entry's href.
    pub fn id(&self) -> Option<u32> {
        id_from_href(&self.href)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FirmwareName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FirmwareInstalled {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FirmwareImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware: Option<FirmwareName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed: Option<FirmwareInstalled>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceFirmwarePackage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<FirmwareName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseInfo {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinkInfo {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    /// Observed values include `RF` and `ClearConnectTypeX`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

/// Packed device class, e.g. `{"HexadecimalEncoding": "81b0101"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceClass {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hexadecimal_encoding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    #[serde(rename = "MACAddress", skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

/// One entry of a device definition body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceDefinition {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<HRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_rules: Option<Vec<HRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_image: Option<FirmwareImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_firmware_package: Option<DeviceFirmwarePackage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub databases: Option<Vec<DatabaseInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_links: Option<Vec<LinkInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addressed_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_nodes: Option<Vec<HRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_this_device: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_interfaces: Option<Vec<NetworkInterface>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<DeviceClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_area: Option<HRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_zones: Option<Vec<HRef>>,
}

impl DeviceDefinition {
    /// Device id named by the entry's href.
    pub fn id(&self) -> Option<u32> {
        id_from_href(&self.href)
    }
}

/// Body of `OneDeviceStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneDeviceStatusBody {
    pub device_status: DeviceStatus,
}

/// Body of `MultipleDeviceStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipleDeviceStatusBody {
    #[serde(default)]
    pub device_statuses: Vec<DeviceStatus>,
}

/// Body of `MultipleDeviceDefinition`, the result of a device query such
/// as `/device?where=IsThisDevice:true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipleDeviceDefinitionBody {
    #[serde(default)]
    pub devices: Vec<DeviceDefinition>,
}
